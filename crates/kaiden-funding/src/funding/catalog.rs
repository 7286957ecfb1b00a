use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::domain::{
    CostStructure, EntityType, FundingSource, FundingSourceType, FundingTrack, SourceId,
    SourceRestrictions,
};

/// Read access to the funding product catalog.
pub trait SourceCatalog: Send + Sync {
    fn sources(&self) -> Result<Vec<FundingSource>, CatalogError>;
}

/// Catalog loading and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog entry {id} is invalid: {reason}")]
    InvalidSource { id: String, reason: String },
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Immutable in-memory catalog, shared freely across requests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    sources: Vec<FundingSource>,
}

impl StaticCatalog {
    pub fn new(sources: Vec<FundingSource>) -> Result<Self, CatalogError> {
        validate_catalog(&sources)?;
        Ok(Self { sources })
    }

    /// Reference products shipped with the service.
    pub fn bundled() -> Self {
        Self {
            sources: bundled_sources(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let sources: Vec<FundingSource> = serde_json::from_str(raw)?;
        Self::new(sources)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceCatalog for StaticCatalog {
    fn sources(&self) -> Result<Vec<FundingSource>, CatalogError> {
        Ok(self.sources.clone())
    }
}

fn invalid(source: &FundingSource, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidSource {
        id: source.id.0.clone(),
        reason: reason.into(),
    }
}

pub(crate) fn validate_catalog(sources: &[FundingSource]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for source in sources {
        if source.id.0.trim().is_empty() {
            return Err(invalid(source, "missing id"));
        }
        if !seen.insert(&source.id) {
            return Err(invalid(source, "duplicate id"));
        }
        if source.track.is_empty() {
            return Err(invalid(source, "no funding track"));
        }
        if !(source.min_amount >= 0.0 && source.min_amount <= source.max_amount) {
            return Err(invalid(
                source,
                format!(
                    "amount range {}-{} must be non-negative and ordered",
                    source.min_amount, source.max_amount
                ),
            ));
        }
        if source.cost_structure.is_empty() {
            return Err(invalid(source, "cost structure needs apr, fees or equity stake"));
        }
    }

    Ok(())
}

fn text(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn bundled_sources() -> Vec<FundingSource> {
    vec![
        FundingSource {
            id: SourceId("source_1".to_string()),
            name: "Business Line of Credit - Fast Track".to_string(),
            source_type: FundingSourceType::LineOfCredit,
            track: vec![FundingTrack::Business],
            min_amount: 10_000.0,
            max_amount: 250_000.0,
            min_credit_score: Some(650),
            min_time_in_business: Some(12),
            min_revenue: Some(200_000.0),
            approval_timeframe: "24-48 hours".to_string(),
            cost_structure: CostStructure {
                apr: Some("12-18%".to_string()),
                fees: Some("$0 origination, $99 annual fee".to_string()),
                equity_stake: None,
            },
            requirements: text(&[
                "Active business checking account",
                "12+ months in business",
                "Minimum $200k annual revenue",
                "Personal credit 650+",
            ]),
            restrictions: SourceRestrictions {
                industries: Some(text(&["Cannabis", "Adult Entertainment", "Gambling"])),
                states: Some(Vec::new()),
                entity_types: Some(Vec::new()),
            },
            partner_id: Some("partner_1".to_string()),
        },
        FundingSource {
            id: SourceId("source_2".to_string()),
            name: "SBA 7(a) Loan".to_string(),
            source_type: FundingSourceType::Loan,
            track: vec![FundingTrack::Business],
            min_amount: 50_000.0,
            max_amount: 5_000_000.0,
            min_credit_score: Some(680),
            min_time_in_business: Some(24),
            min_revenue: Some(250_000.0),
            approval_timeframe: "30-60 days".to_string(),
            cost_structure: CostStructure {
                apr: Some("6.5-10%".to_string()),
                fees: Some("2-3% guarantee fee".to_string()),
                equity_stake: None,
            },
            requirements: text(&[
                "2+ years in business",
                "Strong business plan",
                "Personal guarantee",
                "Collateral required",
                "Tax returns (3 years)",
                "Financial statements",
            ]),
            restrictions: SourceRestrictions {
                industries: Some(text(&["Lending", "Speculation", "Multi-level Marketing"])),
                states: Some(Vec::new()),
                entity_types: Some(vec![EntityType::SoleProprietor]),
            },
            partner_id: Some("partner_2".to_string()),
        },
        FundingSource {
            id: SourceId("source_3".to_string()),
            name: "Revenue-Based Financing".to_string(),
            source_type: FundingSourceType::Alternative,
            track: vec![FundingTrack::Business, FundingTrack::Creator],
            min_amount: 25_000.0,
            max_amount: 500_000.0,
            min_credit_score: None,
            min_time_in_business: Some(6),
            min_revenue: Some(150_000.0),
            approval_timeframe: "3-5 days".to_string(),
            cost_structure: CostStructure {
                apr: None,
                fees: Some("1.2-1.4x payback".to_string()),
                equity_stake: None,
            },
            requirements: text(&[
                "Recurring revenue model",
                "6+ months operating history",
                "Bank account or payment processor access",
                "No minimum credit score",
            ]),
            restrictions: SourceRestrictions {
                industries: Some(Vec::new()),
                states: Some(Vec::new()),
                entity_types: Some(Vec::new()),
            },
            partner_id: Some("partner_3".to_string()),
        },
        FundingSource {
            id: SourceId("source_4".to_string()),
            name: "DSCR Investment Property Loan".to_string(),
            source_type: FundingSourceType::Loan,
            track: vec![FundingTrack::RealEstate],
            min_amount: 100_000.0,
            max_amount: 3_000_000.0,
            min_credit_score: None,
            min_time_in_business: None,
            min_revenue: None,
            approval_timeframe: "14-21 days".to_string(),
            cost_structure: CostStructure {
                apr: Some("7.5-9.5%".to_string()),
                fees: Some("1-2 points origination".to_string()),
                equity_stake: None,
            },
            requirements: text(&[
                "DSCR 1.2+",
                "Property appraisal",
                "20-25% down payment",
                "Rent roll or lease agreements",
                "Property insurance",
            ]),
            restrictions: SourceRestrictions {
                industries: None,
                states: Some(Vec::new()),
                entity_types: Some(Vec::new()),
            },
            partner_id: Some("partner_4".to_string()),
        },
        FundingSource {
            id: SourceId("source_5".to_string()),
            name: "Equipment Financing".to_string(),
            source_type: FundingSourceType::Loan,
            track: vec![FundingTrack::Business],
            min_amount: 5_000.0,
            max_amount: 500_000.0,
            min_credit_score: Some(600),
            min_time_in_business: Some(6),
            min_revenue: None,
            approval_timeframe: "2-3 days".to_string(),
            cost_structure: CostStructure {
                apr: Some("8-15%".to_string()),
                fees: Some("First and last payment upfront".to_string()),
                equity_stake: None,
            },
            requirements: text(&[
                "Equipment quote or invoice",
                "6+ months in business",
                "Basic financial statements",
            ]),
            restrictions: SourceRestrictions {
                industries: Some(Vec::new()),
                states: Some(Vec::new()),
                entity_types: Some(Vec::new()),
            },
            partner_id: None,
        },
    ]
}
