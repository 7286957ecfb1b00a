use serde::{Deserialize, Serialize};

use super::scoring::OptimizationMode;

/// Construction-time settings for the decision engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub mode: OptimizationMode,
}

impl EngineConfig {
    pub fn with_mode(mode: OptimizationMode) -> Self {
        Self { mode }
    }
}
