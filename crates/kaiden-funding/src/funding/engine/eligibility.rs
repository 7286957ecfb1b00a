use serde::{Deserialize, Serialize};

use super::super::domain::{EntityType, FundingProfile, FundingSource, FundingTrack, User};

/// First failed eligibility check for a source, used to explain exclusions in logs and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IneligibilityReason {
    TrackMismatch {
        requested: FundingTrack,
    },
    CreditBelowMinimum {
        required: u16,
        estimated: u16,
    },
    InsufficientTimeInBusiness {
        required_months: u32,
        actual_months: u32,
    },
    InsufficientRevenue {
        required: f64,
        actual: f64,
    },
    AmountOutOfRange {
        requested: f64,
        min: f64,
        max: f64,
    },
    RestrictedIndustry(String),
    RestrictedState(String),
    RestrictedEntityType(EntityType),
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::TrackMismatch { requested } => {
                format!("source does not serve the {} track", requested.label())
            }
            IneligibilityReason::CreditBelowMinimum {
                required,
                estimated,
            } => format!("estimated credit {estimated} below minimum {required}"),
            IneligibilityReason::InsufficientTimeInBusiness {
                required_months,
                actual_months,
            } => format!("{actual_months} month(s) in business, {required_months} required"),
            IneligibilityReason::InsufficientRevenue { required, actual } => {
                format!("annual revenue {actual:.0} below minimum {required:.0}")
            }
            IneligibilityReason::AmountOutOfRange {
                requested,
                min,
                max,
            } => format!("requested {requested:.0} outside {min:.0}-{max:.0}"),
            IneligibilityReason::RestrictedIndustry(industry) => {
                format!("industry '{industry}' is restricted")
            }
            IneligibilityReason::RestrictedState(state) => format!("state '{state}' is restricted"),
            IneligibilityReason::RestrictedEntityType(entity) => {
                format!("entity type {entity:?} is restricted")
            }
        }
    }
}

/// Whether `source` can be offered to this user for this request at all.
pub fn is_eligible(source: &FundingSource, user: &User, profile: &FundingProfile) -> bool {
    eligibility_failure(source, user, profile).is_none()
}

/// Runs the eligibility checks in a fixed order and returns the first failure.
///
/// Optional lender minimums only apply when the applicant reported the matching figure;
/// missing time in business or revenue is "not checked" rather than a failure.
pub fn eligibility_failure(
    source: &FundingSource,
    user: &User,
    profile: &FundingProfile,
) -> Option<IneligibilityReason> {
    let applicant = &user.profile;

    if !source.serves(profile.track) {
        return Some(IneligibilityReason::TrackMismatch {
            requested: profile.track,
        });
    }

    if let Some(required) = source.min_credit_score {
        let estimated = applicant.credit_tier.representative_score();
        if estimated < required {
            return Some(IneligibilityReason::CreditBelowMinimum {
                required,
                estimated,
            });
        }
    }

    if let (Some(required_months), Some(actual_months)) =
        (source.min_time_in_business, applicant.time_in_business)
    {
        if actual_months < required_months {
            return Some(IneligibilityReason::InsufficientTimeInBusiness {
                required_months,
                actual_months,
            });
        }
    }

    if let (Some(required), Some(actual)) = (source.min_revenue, applicant.annual_revenue) {
        if actual < required {
            return Some(IneligibilityReason::InsufficientRevenue { required, actual });
        }
    }

    if !source.covers_amount(profile.target_amount) {
        return Some(IneligibilityReason::AmountOutOfRange {
            requested: profile.target_amount,
            min: source.min_amount,
            max: source.max_amount,
        });
    }

    let restrictions = &source.restrictions;
    if let (Some(industries), Some(industry)) = (&restrictions.industries, &applicant.industry) {
        if industries.contains(industry) {
            return Some(IneligibilityReason::RestrictedIndustry(industry.clone()));
        }
    }

    if let (Some(states), Some(state)) = (&restrictions.states, &applicant.state) {
        if states.contains(state) {
            return Some(IneligibilityReason::RestrictedState(state.clone()));
        }
    }

    if let Some(entity_types) = &restrictions.entity_types {
        if entity_types.contains(&applicant.entity_type) {
            return Some(IneligibilityReason::RestrictedEntityType(
                applicant.entity_type,
            ));
        }
    }

    None
}
