use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::funding::catalog::{bundled_sources, CatalogError, SourceCatalog, StaticCatalog};
use crate::funding::domain::{
    CostStructure, CreditTier, EntityType, FundingProfile, FundingProfileId, FundingSource,
    FundingSourceType, FundingTrack, SourceId, SourceRestrictions, TrustScore, Urgency, User,
    UserId, UserProfile,
};
use crate::funding::engine::{EngineConfig, OptimizationMode};
use crate::funding::service::{FundingRecommendationService, RecommendationRequest};

pub(super) fn applicant() -> UserProfile {
    UserProfile {
        first_name: "Alex".to_string(),
        last_name: "Chen".to_string(),
        business_name: Some("TechFlow Solutions LLC".to_string()),
        entity_type: EntityType::Llc,
        credit_tier: CreditTier::Good,
        annual_revenue: Some(450_000.0),
        monthly_revenue: Some(37_500.0),
        time_in_business: Some(18),
        industry: Some("Software & Technology".to_string()),
        state: Some("California".to_string()),
        funding_track: vec![FundingTrack::Business],
    }
}

pub(super) fn user() -> User {
    User {
        id: UserId("user_1".to_string()),
        email: "founder@example.com".to_string(),
        phone: Some("+1 (555) 123-4567".to_string()),
        email_verified: true,
        phone_verified: true,
        trust_score: TrustScore::from_score(72.0),
        profile: applicant(),
    }
}

pub(super) fn user_with(adjust: impl FnOnce(&mut User)) -> User {
    let mut user = user();
    adjust(&mut user);
    user
}

pub(super) fn profile() -> FundingProfile {
    FundingProfile {
        id: FundingProfileId("profile_1".to_string()),
        user_id: UserId("user_1".to_string()),
        track: FundingTrack::Business,
        target_amount: 150_000.0,
        urgency: Urgency::Medium,
        purpose: "Expand operations, hire team, and increase marketing".to_string(),
        readiness_score: 68.0,
        intake_completed: true,
    }
}

pub(super) fn profile_with(adjust: impl FnOnce(&mut FundingProfile)) -> FundingProfile {
    let mut profile = profile();
    adjust(&mut profile);
    profile
}

/// Bundled catalog entry by id.
pub(super) fn bundled(id: &str) -> FundingSource {
    bundled_sources()
        .into_iter()
        .find(|source| source.id.0 == id)
        .expect("bundled source exists")
}

pub(super) fn fast_track_line() -> FundingSource {
    bundled("source_1")
}

pub(super) fn sba_loan() -> FundingSource {
    bundled("source_2")
}

pub(super) fn revenue_based() -> FundingSource {
    bundled("source_3")
}

/// Permissive source with no optional minimums and a single APR string.
pub(super) fn plain_source(id: &str) -> FundingSource {
    FundingSource {
        id: SourceId(id.to_string()),
        name: format!("Plain {id}"),
        source_type: FundingSourceType::Loan,
        track: vec![FundingTrack::Business],
        min_amount: 1_000.0,
        max_amount: 1_000_000.0,
        min_credit_score: None,
        min_time_in_business: None,
        min_revenue: None,
        approval_timeframe: "7 days".to_string(),
        cost_structure: CostStructure {
            apr: Some("10%".to_string()),
            fees: None,
            equity_stake: None,
        },
        requirements: Vec::new(),
        restrictions: SourceRestrictions::default(),
        partner_id: None,
    }
}

pub(super) fn source_with(id: &str, adjust: impl FnOnce(&mut FundingSource)) -> FundingSource {
    let mut source = plain_source(id);
    adjust(&mut source);
    source
}

pub(super) fn request(mode: Option<OptimizationMode>) -> RecommendationRequest {
    RecommendationRequest {
        profile: profile(),
        user: user(),
        mode,
    }
}

pub(super) fn build_service() -> FundingRecommendationService<StaticCatalog> {
    FundingRecommendationService::new(Arc::new(StaticCatalog::bundled()), EngineConfig::default())
}

pub(super) struct UnavailableCatalog;

impl SourceCatalog for UnavailableCatalog {
    fn sources(&self) -> Result<Vec<FundingSource>, CatalogError> {
        Err(CatalogError::Unavailable("catalog store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
