//! Explainability output for a scored source.
//!
//! Every rule is an independent `(predicate, message)` pair. Tables are evaluated top to bottom
//! and every matching rule contributes, so adding a rule never changes whether an existing rule
//! fires.

use serde::{Deserialize, Serialize};

use super::super::domain::{FundingProfile, FundingSource, FundingSourceType, User};
use super::cost::leading_number;
use super::probability::ratio_to_minimum;

pub const BASE_CONFIDENCE: f64 = 0.7;
pub const MAX_CONFIDENCE: f64 = 0.95;
pub const MAX_NEXT_ACTIONS: usize = 4;

/// Inputs shared by every rationale rule.
#[derive(Debug, Clone, Copy)]
pub struct RationaleContext<'a> {
    pub source: &'a FundingSource,
    pub user: &'a User,
    pub profile: &'a FundingProfile,
    pub approval_probability: f64,
    pub speed_days: f64,
}

/// Text rule contributing `message` whenever `applies` holds.
pub struct Rule {
    pub applies: fn(&RationaleContext<'_>) -> bool,
    pub message: &'static str,
}

/// Numeric rule contributing `increment` to the confidence figure.
pub struct ConfidenceRule {
    pub applies: fn(&RationaleContext<'_>) -> bool,
    pub increment: f64,
}

fn collect(rules: &[Rule], ctx: &RationaleContext<'_>) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .map(|rule| rule.message.to_string())
        .collect()
}

fn business_history_ratio(ctx: &RationaleContext<'_>) -> Option<f64> {
    ratio_to_minimum(
        ctx.user.profile.time_in_business.map(f64::from),
        ctx.source.min_time_in_business.map(f64::from),
    )
}

fn revenue_ratio(ctx: &RationaleContext<'_>) -> Option<f64> {
    ratio_to_minimum(ctx.user.profile.annual_revenue, ctx.source.min_revenue)
}

/// Opening phrase of the explanation; the first matching band wins.
pub const MATCH_BANDS: &[Rule] = &[
    Rule {
        applies: |ctx| ctx.approval_probability >= 0.8,
        message: "Excellent match based on your profile",
    },
    Rule {
        applies: |ctx| ctx.approval_probability >= 0.65,
        message: "Good fit for your situation",
    },
    Rule {
        applies: |_| true,
        message: "Possible option with some limitations",
    },
];

pub const EXPLANATION_CLAUSES: &[Rule] = &[
    Rule {
        applies: |ctx| ctx.user.profile.credit_tier.is_strong(),
        message: "strong credit profile",
    },
    Rule {
        applies: |ctx| business_history_ratio(ctx).is_some_and(|ratio| ratio >= 1.5),
        message: "well-established business history",
    },
    Rule {
        applies: |ctx| revenue_ratio(ctx).is_some_and(|ratio| ratio >= 2.0),
        message: "strong revenue performance",
    },
];

pub const TRADEOFF_RULES: &[Rule] = &[
    Rule {
        applies: |ctx| ctx.speed_days <= 3.0,
        message: "Very fast approval, but may have higher costs",
    },
    Rule {
        applies: |ctx| ctx.speed_days >= 30.0,
        message: "Longer timeline, but typically lower rates",
    },
    Rule {
        applies: |ctx| {
            ctx.source
                .cost_structure
                .apr
                .as_deref()
                .and_then(leading_number)
                .is_some_and(|apr| apr < 10.0)
        },
        message: "Low APR, but extensive documentation required",
    },
    Rule {
        applies: |ctx| ctx.source.source_type == FundingSourceType::Alternative,
        message: "Flexible requirements, but higher total cost",
    },
    Rule {
        applies: |ctx| ctx.source.requirements.len() > 5,
        message: "Comprehensive requirements may extend timeline",
    },
];

pub const NEXT_ACTION_RULES: &[Rule] = &[
    Rule {
        applies: |ctx| ctx.source.requirement_mentions("checking account"),
        message: "Connect business bank account",
    },
    Rule {
        applies: |ctx| ctx.source.requirement_mentions("statement"),
        message: "Prepare financial statements",
    },
    Rule {
        applies: |ctx| ctx.source.requirement_mentions("credit"),
        message: "Complete credit authorization",
    },
    Rule {
        applies: |ctx| !ctx.user.profile.has_business_name(),
        message: "Complete business profile",
    },
];

/// Used when no next-action rule fires.
pub const DEFAULT_NEXT_ACTIONS: [&str; 2] = ["Review full requirements", "Start application process"];

pub const BLOCKER_RULES: &[Rule] = &[
    Rule {
        applies: |ctx| ctx.user.trust_score.score < 60.0 && ctx.source.requirements.len() > 3,
        message: "Increase trust score to unlock faster processing",
    },
    Rule {
        applies: |ctx| ctx.profile.readiness_score < 50.0,
        message: "Improve readiness score for better approval odds",
    },
    Rule {
        applies: |ctx| {
            ctx.source.min_credit_score.is_some_and(|min| min >= 680)
                && ctx.user.profile.credit_tier.is_weak()
        },
        message: "Credit score may need improvement",
    },
];

/// More reported data means a more trustworthy estimate.
pub const CONFIDENCE_RULES: &[ConfidenceRule] = &[
    ConfidenceRule {
        applies: |ctx| ctx.user.profile.annual_revenue.is_some(),
        increment: 0.05,
    },
    ConfidenceRule {
        applies: |ctx| ctx.user.profile.time_in_business.is_some(),
        increment: 0.05,
    },
    ConfidenceRule {
        applies: |ctx| ctx.user.email_verified && ctx.user.phone_verified,
        increment: 0.05,
    },
    ConfidenceRule {
        applies: |ctx| ctx.profile.intake_completed,
        increment: 0.10,
    },
    ConfidenceRule {
        applies: |ctx| ctx.user.trust_score.score >= 70.0,
        increment: 0.05,
    },
];

pub fn explanation(ctx: &RationaleContext<'_>) -> String {
    let mut reasons: Vec<&str> = MATCH_BANDS
        .iter()
        .find(|band| (band.applies)(ctx))
        .map(|band| band.message)
        .into_iter()
        .collect();

    reasons.extend(
        EXPLANATION_CLAUSES
            .iter()
            .filter(|rule| (rule.applies)(ctx))
            .map(|rule| rule.message),
    );

    format!("{}.", reasons.join(", "))
}

pub fn tradeoffs(ctx: &RationaleContext<'_>) -> Vec<String> {
    collect(TRADEOFF_RULES, ctx)
}

pub fn next_actions(ctx: &RationaleContext<'_>) -> Vec<String> {
    let mut actions = collect(NEXT_ACTION_RULES, ctx);
    if actions.is_empty() {
        actions = DEFAULT_NEXT_ACTIONS
            .iter()
            .map(|action| action.to_string())
            .collect();
    }
    actions.truncate(MAX_NEXT_ACTIONS);
    actions
}

pub fn blockers(ctx: &RationaleContext<'_>) -> Vec<String> {
    collect(BLOCKER_RULES, ctx)
}

pub fn confidence(ctx: &RationaleContext<'_>) -> f64 {
    let confidence = CONFIDENCE_RULES
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .fold(BASE_CONFIDENCE, |total, rule| total + rule.increment);

    confidence.min(MAX_CONFIDENCE)
}

/// Bundle of all explainability outputs for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rationale {
    pub explanation: String,
    pub tradeoffs: Vec<String>,
    pub next_actions: Vec<String>,
    pub blockers: Vec<String>,
    pub confidence: f64,
}

impl Rationale {
    pub fn build(ctx: &RationaleContext<'_>) -> Self {
        Self {
            explanation: explanation(ctx),
            tradeoffs: tradeoffs(ctx),
            next_actions: next_actions(ctx),
            blockers: blockers(ctx),
            confidence: confidence(ctx),
        }
    }
}
