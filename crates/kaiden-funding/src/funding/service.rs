use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{CatalogError, SourceCatalog};
use super::domain::{FundingProfile, FundingProfileId, FundingRecommendation, FundingSource, User};
use super::engine::{EngineConfig, EngineError, FundingDecisionEngine, OptimizationMode};

/// Inbound request: one funding profile, its applicant, and an optional mode override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub profile: FundingProfile,
    pub user: User,
    #[serde(default)]
    pub mode: Option<OptimizationMode>,
}

/// Ranked output returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub funding_profile_id: FundingProfileId,
    pub mode: OptimizationMode,
    pub generated_at: DateTime<Utc>,
    pub evaluated_sources: usize,
    pub recommendations: Vec<FundingRecommendation>,
}

impl RecommendationSet {
    pub fn top(&self) -> Option<&FundingRecommendation> {
        self.recommendations.first()
    }
}

/// Service composing the source catalog with the decision engine.
pub struct FundingRecommendationService<C> {
    catalog: Arc<C>,
    engine: FundingDecisionEngine,
}

impl<C> FundingRecommendationService<C>
where
    C: SourceCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, config: EngineConfig) -> Self {
        Self {
            catalog,
            engine: FundingDecisionEngine::new(config),
        }
    }

    pub fn default_mode(&self) -> OptimizationMode {
        self.engine.mode()
    }

    /// Rank the catalog for a request, honoring a per-request mode override.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationSet, FundingServiceError> {
        let sources = self.catalog.sources()?;
        let mode = request.mode.unwrap_or_else(|| self.engine.mode());
        let engine = FundingDecisionEngine::new(EngineConfig::with_mode(mode));

        let recommendations = engine
            .generate_recommendations(&request.profile, &request.user, &sources)
            .inspect_err(|err| {
                warn!(profile = %request.profile.id.0, error = %err, "recommendation request rejected");
            })?;

        if let Some(top) = recommendations.first() {
            info!(
                profile = %request.profile.id.0,
                top_source = %top.source.id.0,
                top_score = top.score,
                "top funding recommendation selected"
            );
        }

        Ok(RecommendationSet {
            funding_profile_id: request.profile.id.clone(),
            mode,
            generated_at: Utc::now(),
            evaluated_sources: sources.len(),
            recommendations,
        })
    }

    pub fn sources(&self) -> Result<Vec<FundingSource>, FundingServiceError> {
        Ok(self.catalog.sources()?)
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum FundingServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
