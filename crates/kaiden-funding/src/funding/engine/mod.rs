mod config;
pub mod cost;
mod eligibility;
mod probability;
pub mod rationale;
mod scoring;
mod timeframe;

pub use config::EngineConfig;
pub use cost::{estimate_net_cost, CostClass};
pub use eligibility::{eligibility_failure, is_eligible, IneligibilityReason};
pub use probability::{
    estimate_approval_probability, MAX_APPROVAL_PROBABILITY, MIN_APPROVAL_PROBABILITY,
};
pub use rationale::{Rationale, RationaleContext};
pub use scoring::{composite_score, OptimizationMode, SubScores, UnknownOptimizationMode};
pub use timeframe::{parse_timeframe_days, DEFAULT_TIMEFRAME_DAYS};

use tracing::{debug, info};

use super::domain::{FundingProfile, FundingRecommendation, FundingSource, SourceId, User};

/// Caller contract violations detected before any scoring happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("target amount must be a positive, finite value (found {0})")]
    InvalidTargetAmount(f64),
    #[error("source {} has an invalid amount range ({min} > {max})", source_id.0)]
    InvalidAmountRange {
        source_id: SourceId,
        min: f64,
        max: f64,
    },
}

/// Stateless evaluator that ranks a catalog for one funding request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FundingDecisionEngine {
    config: EngineConfig,
}

impl FundingDecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn mode(&self) -> OptimizationMode {
        self.config.mode
    }

    pub fn generate_recommendations(
        &self,
        profile: &FundingProfile,
        user: &User,
        sources: &[FundingSource],
    ) -> Result<Vec<FundingRecommendation>, EngineError> {
        generate_recommendations(profile, user, sources, self.config.mode)
    }
}

fn validate(profile: &FundingProfile, sources: &[FundingSource]) -> Result<(), EngineError> {
    if !(profile.target_amount.is_finite() && profile.target_amount > 0.0) {
        return Err(EngineError::InvalidTargetAmount(profile.target_amount));
    }

    for source in sources {
        // Also rejects NaN bounds.
        if !(source.min_amount <= source.max_amount) {
            return Err(EngineError::InvalidAmountRange {
                source_id: source.id.clone(),
                min: source.min_amount,
                max: source.max_amount,
            });
        }
    }

    Ok(())
}

/// Scores one source that already passed eligibility. `rank` is left at zero.
pub fn score_source(
    source: &FundingSource,
    user: &User,
    profile: &FundingProfile,
    mode: OptimizationMode,
) -> FundingRecommendation {
    let approval_probability = estimate_approval_probability(source, user, profile);
    let speed = parse_timeframe_days(&source.approval_timeframe);
    let net_cost = estimate_net_cost(source, profile.target_amount);
    let score = composite_score(approval_probability, speed, net_cost, profile, mode);

    let rationale = Rationale::build(&RationaleContext {
        source,
        user,
        profile,
        approval_probability,
        speed_days: speed,
    });

    FundingRecommendation {
        id: format!("rec_{}", source.id.0),
        funding_profile_id: profile.id.clone(),
        source: source.clone(),
        approval_probability,
        speed,
        net_cost,
        score,
        confidence: rationale.confidence,
        explanation: rationale.explanation,
        tradeoffs: rationale.tradeoffs,
        next_actions: rationale.next_actions,
        blockers: rationale.blockers,
        estimated_amount: profile.target_amount,
        rank: 0,
    }
}

/// Filters, scores and ranks `sources` for one request.
///
/// Ties on score keep catalog order. An empty result is not an error.
pub fn generate_recommendations(
    profile: &FundingProfile,
    user: &User,
    sources: &[FundingSource],
    mode: OptimizationMode,
) -> Result<Vec<FundingRecommendation>, EngineError> {
    validate(profile, sources)?;

    let mut recommendations: Vec<FundingRecommendation> = sources
        .iter()
        .filter(|source| match eligibility_failure(source, user, profile) {
            Some(reason) => {
                debug!(
                    source = %source.id.0,
                    reason = %reason.summary(),
                    "funding source excluded"
                );
                false
            }
            None => true,
        })
        .map(|source| score_source(source, user, profile, mode))
        .collect();

    // `sort_by` is stable, so equal scores stay in catalog order.
    recommendations.sort_by(|a, b| b.score.cmp(&a.score));

    for (index, recommendation) in recommendations.iter_mut().enumerate() {
        recommendation.rank = index as u32 + 1;
    }

    info!(
        profile = %profile.id.0,
        %mode,
        evaluated = sources.len(),
        eligible = recommendations.len(),
        "funding recommendations ranked"
    );

    Ok(recommendations)
}
