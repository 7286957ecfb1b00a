use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::domain::FundingProfile;

/// Weighting strategy applied by the composite scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationMode {
    FastestMoney,
    LowestCost,
    #[default]
    Balanced,
}

impl OptimizationMode {
    pub const ALL: [OptimizationMode; 3] = [
        OptimizationMode::FastestMoney,
        OptimizationMode::LowestCost,
        OptimizationMode::Balanced,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            OptimizationMode::FastestMoney => "fastest-money",
            OptimizationMode::LowestCost => "lowest-cost",
            OptimizationMode::Balanced => "balanced",
        }
    }

    pub const fn weights(self) -> ScoreWeights {
        match self {
            OptimizationMode::FastestMoney => ScoreWeights {
                speed: 0.5,
                approval: 0.35,
                cost: 0.15,
            },
            OptimizationMode::LowestCost => ScoreWeights {
                speed: 0.15,
                approval: 0.35,
                cost: 0.5,
            },
            OptimizationMode::Balanced => ScoreWeights {
                speed: 0.3,
                approval: 0.4,
                cost: 0.3,
            },
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOptimizationMode(pub String);

impl fmt::Display for UnknownOptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown optimization mode '{}' (expected fastest-money, lowest-cost or balanced)",
            self.0
        )
    }
}

impl std::error::Error for UnknownOptimizationMode {}

impl FromStr for OptimizationMode {
    type Err = UnknownOptimizationMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fastest-money" | "fastest" => Ok(OptimizationMode::FastestMoney),
            "lowest-cost" | "cheapest" => Ok(OptimizationMode::LowestCost),
            "balanced" => Ok(OptimizationMode::Balanced),
            _ => Err(UnknownOptimizationMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub speed: f64,
    pub approval: f64,
    pub cost: f64,
}

/// Normalized 0-100 sub-scores feeding the blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub speed: f64,
    pub cost: f64,
    pub approval: f64,
}

impl SubScores {
    /// Requires a positive `target_amount`; the orchestrator validates this up front.
    pub fn new(approval_probability: f64, speed_days: f64, net_cost: f64, target_amount: f64) -> Self {
        Self {
            speed: (100.0 - speed_days * 2.0).max(0.0),
            cost: (100.0 - (net_cost / target_amount) * 200.0).max(0.0),
            approval: approval_probability * 100.0,
        }
    }
}

/// Blends approval odds, speed and cost into a single rounded ranking score.
pub fn composite_score(
    approval_probability: f64,
    speed_days: f64,
    net_cost: f64,
    profile: &FundingProfile,
    mode: OptimizationMode,
) -> i32 {
    let sub = SubScores::new(
        approval_probability,
        speed_days,
        net_cost,
        profile.target_amount,
    );
    let weights = mode.weights();

    let blended = match mode {
        OptimizationMode::FastestMoney => {
            sub.speed * weights.speed + sub.approval * weights.approval + sub.cost * weights.cost
        }
        OptimizationMode::LowestCost => {
            sub.cost * weights.cost + sub.approval * weights.approval + sub.speed * weights.speed
        }
        OptimizationMode::Balanced => {
            sub.approval * weights.approval + sub.speed * weights.speed + sub.cost * weights.cost
        }
    };

    blended.round() as i32
}
