use kaiden_funding::config::AppConfig;
use kaiden_funding::error::AppError;
use kaiden_funding::funding::{
    CatalogError, CreditTier, EntityType, FundingProfile, FundingProfileId, FundingTrack,
    OptimizationMode, RecommendationRequest, StaticCatalog, TrustScore, Urgency, User, UserId,
    UserProfile,
};
use kaiden_funding::telemetry::{self, LogTarget};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// JSON catalog at `path` when given, the bundled reference products otherwise.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = StaticCatalog::from_path(path)?;
            info!(path = %path.display(), sources = catalog.len(), "funding catalog loaded");
            Ok(catalog)
        }
        None => Ok(StaticCatalog::bundled()),
    }
}

pub(crate) fn parse_mode(raw: &str) -> Result<OptimizationMode, String> {
    raw.parse::<OptimizationMode>().map_err(|err| err.to_string())
}

pub(crate) fn read_request(path: &Path) -> Result<RecommendationRequest, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Config plus a stderr log subscriber; stdout stays reserved for command output.
pub(crate) fn cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    Ok(config)
}

/// Established LLC used by the demo command.
pub(crate) fn sample_request(mode: Option<OptimizationMode>) -> RecommendationRequest {
    let user_id = UserId("user_demo".to_string());

    RecommendationRequest {
        profile: FundingProfile {
            id: FundingProfileId("profile_demo".to_string()),
            user_id: user_id.clone(),
            track: FundingTrack::Business,
            target_amount: 150_000.0,
            urgency: Urgency::Medium,
            purpose: "Expand operations, hire team, and increase marketing".to_string(),
            readiness_score: 68.0,
            intake_completed: true,
        },
        user: User {
            id: user_id,
            email: "alex@techflow.example".to_string(),
            phone: Some("+1 (555) 123-4567".to_string()),
            email_verified: true,
            phone_verified: true,
            trust_score: TrustScore::from_score(72.0),
            profile: UserProfile {
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
            },
        },
        mode,
    }
}
