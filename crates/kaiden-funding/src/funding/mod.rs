//! Funding recommendation workflow: catalog access, the decision engine, and the service and
//! HTTP surfaces that expose ranked recommendations.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, SourceCatalog, StaticCatalog};
pub use domain::{
    CostStructure, CreditTier, EntityType, FundingProfile, FundingProfileId,
    FundingRecommendation, FundingSource, FundingSourceType, FundingTrack, SourceId,
    SourceRestrictions, TrustScore, TrustScoreLevel, Urgency, User, UserId, UserProfile,
};
pub use engine::{
    generate_recommendations, EngineConfig, EngineError, FundingDecisionEngine,
    OptimizationMode,
};
pub use router::funding_router;
pub use service::{
    FundingRecommendationService, FundingServiceError, RecommendationRequest, RecommendationSet,
};
