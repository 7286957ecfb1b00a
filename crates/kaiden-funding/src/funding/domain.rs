use serde::{Deserialize, Serialize};

/// Identifier wrapper for funding requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FundingProfileId(pub String);

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Funding programs an applicant can pursue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingTrack {
    Business,
    RealEstate,
    Creator,
}

impl FundingTrack {
    pub const fn label(self) -> &'static str {
        match self {
            FundingTrack::Business => "business",
            FundingTrack::RealEstate => "real-estate",
            FundingTrack::Creator => "creator",
        }
    }
}

/// How quickly the applicant needs capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// Self-reported personal credit band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl CreditTier {
    /// Representative bureau score used when comparing against a lender minimum.
    pub const fn representative_score(self) -> u16 {
        match self {
            CreditTier::Excellent => 750,
            CreditTier::Good => 680,
            CreditTier::Fair => 620,
            CreditTier::Poor => 550,
            CreditTier::Unknown => 0,
        }
    }

    pub const fn is_strong(self) -> bool {
        matches!(self, CreditTier::Excellent | CreditTier::Good)
    }

    pub const fn is_weak(self) -> bool {
        matches!(self, CreditTier::Fair | CreditTier::Poor)
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditTier::Excellent => "excellent",
            CreditTier::Good => "good",
            CreditTier::Fair => "fair",
            CreditTier::Poor => "poor",
            CreditTier::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    SoleProprietor,
    Llc,
    SCorp,
    CCorp,
    Partnership,
    None,
}

/// Qualitative band attached to the externally computed trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustScoreLevel {
    Critical,
    Low,
    Medium,
    Good,
    Excellent,
}

impl TrustScoreLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            TrustScoreLevel::Critical
        } else if score < 60.0 {
            TrustScoreLevel::Low
        } else if score < 75.0 {
            TrustScoreLevel::Medium
        } else if score < 85.0 {
            TrustScoreLevel::Good
        } else {
            TrustScoreLevel::Excellent
        }
    }
}

/// Opaque reputation signal supplied by the trust service. Only `score` is read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScore {
    pub score: f64,
    pub level: TrustScoreLevel,
}

impl TrustScore {
    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            level: TrustScoreLevel::from_score(score),
        }
    }
}

/// Applicant attributes owned by the account store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    pub entity_type: EntityType,
    pub credit_tier: CreditTier,
    #[serde(default)]
    pub annual_revenue: Option<f64>,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
    /// Months in operation.
    #[serde(default)]
    pub time_in_business: Option<u32>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub funding_track: Vec<FundingTrack>,
}

impl UserProfile {
    pub fn has_business_name(&self) -> bool {
        self.business_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub trust_score: TrustScore,
    pub profile: UserProfile,
}

/// One funding request. Immutable for the duration of a ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingProfile {
    pub id: FundingProfileId,
    pub user_id: UserId,
    pub track: FundingTrack,
    pub target_amount: f64,
    pub urgency: Urgency,
    #[serde(default)]
    pub purpose: String,
    pub readiness_score: f64,
    #[serde(default)]
    pub intake_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingSourceType {
    Loan,
    LineOfCredit,
    Equity,
    Grant,
    Alternative,
}

impl FundingSourceType {
    pub const fn label(self) -> &'static str {
        match self {
            FundingSourceType::Loan => "loan",
            FundingSourceType::LineOfCredit => "line of credit",
            FundingSourceType::Equity => "equity",
            FundingSourceType::Grant => "grant",
            FundingSourceType::Alternative => "alternative",
        }
    }
}

/// Free-text pricing terms as published by the partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_stake: Option<String>,
}

impl CostStructure {
    pub fn is_empty(&self) -> bool {
        self.apr.is_none() && self.fees.is_none() && self.equity_stake.is_none()
    }
}

/// Applicant attributes that exclude them from a source outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRestrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<EntityType>>,
}

/// Catalog entry describing one capital product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    pub id: SourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: FundingSourceType,
    pub track: Vec<FundingTrack>,
    pub min_amount: f64,
    pub max_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credit_score: Option<u16>,
    /// Months in operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time_in_business: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_revenue: Option<f64>,
    /// e.g. "24-48 hours", "1-2 weeks".
    pub approval_timeframe: String,
    pub cost_structure: CostStructure,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub restrictions: SourceRestrictions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
}

impl FundingSource {
    pub fn serves(&self, track: FundingTrack) -> bool {
        self.track.contains(&track)
    }

    pub fn covers_amount(&self, amount: f64) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    pub fn requirement_mentions(&self, needle: &str) -> bool {
        self.requirements
            .iter()
            .any(|requirement| requirement.contains(needle))
    }
}

/// Ranked, explained candidate produced by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecommendation {
    pub id: String,
    pub funding_profile_id: FundingProfileId,
    pub source: FundingSource,
    pub approval_probability: f64,
    /// Estimated days until funds are available.
    pub speed: f64,
    pub net_cost: f64,
    pub score: i32,
    pub confidence: f64,
    pub explanation: String,
    pub tradeoffs: Vec<String>,
    pub next_actions: Vec<String>,
    pub blockers: Vec<String>,
    pub estimated_amount: f64,
    pub rank: u32,
}
