mod common;
mod engine;
mod rationale;
