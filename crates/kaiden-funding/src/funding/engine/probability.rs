use super::super::domain::{CreditTier, FundingProfile, FundingSource, Urgency, User};

pub const BASE_APPROVAL_PROBABILITY: f64 = 0.5;
pub const MIN_APPROVAL_PROBABILITY: f64 = 0.1;
pub const MAX_APPROVAL_PROBABILITY: f64 = 0.95;

fn credit_adjustment(tier: CreditTier) -> f64 {
    match tier {
        CreditTier::Excellent => 0.25,
        CreditTier::Good => 0.15,
        CreditTier::Fair => 0.05,
        CreditTier::Poor => -0.15,
        CreditTier::Unknown => -0.10,
    }
}

/// Ratio of the applicant's figure to the lender minimum, when both are known.
pub(crate) fn ratio_to_minimum(actual: Option<f64>, minimum: Option<f64>) -> Option<f64> {
    match (actual, minimum) {
        (Some(actual), Some(minimum)) if minimum > 0.0 => Some(actual / minimum),
        _ => None,
    }
}

fn time_in_business_adjustment(ratio: f64) -> f64 {
    if ratio >= 2.0 {
        0.15
    } else if ratio >= 1.5 {
        0.10
    } else if ratio >= 1.0 {
        0.05
    } else {
        0.0
    }
}

fn revenue_adjustment(ratio: f64) -> f64 {
    if ratio >= 3.0 {
        0.15
    } else if ratio >= 2.0 {
        0.10
    } else if ratio >= 1.5 {
        0.05
    } else {
        0.0
    }
}

/// Shared banding for the trust and readiness signals; `[40, 60)` is neutral.
fn signal_adjustment(score: f64) -> f64 {
    if score >= 80.0 {
        0.10
    } else if score >= 60.0 {
        0.05
    } else if score < 40.0 {
        -0.10
    } else {
        0.0
    }
}

/// Additive heuristic estimate of approval odds, clamped to `[0.1, 0.95]`.
pub fn estimate_approval_probability(
    source: &FundingSource,
    user: &User,
    profile: &FundingProfile,
) -> f64 {
    let applicant = &user.profile;
    let mut probability = BASE_APPROVAL_PROBABILITY;

    probability += credit_adjustment(applicant.credit_tier);

    if let Some(ratio) = ratio_to_minimum(
        applicant.time_in_business.map(f64::from),
        source.min_time_in_business.map(f64::from),
    ) {
        probability += time_in_business_adjustment(ratio);
    }

    if let Some(ratio) = ratio_to_minimum(applicant.annual_revenue, source.min_revenue) {
        probability += revenue_adjustment(ratio);
    }

    probability += signal_adjustment(user.trust_score.score);
    probability += signal_adjustment(profile.readiness_score);

    if profile.urgency == Urgency::Critical {
        probability -= 0.05;
    }

    probability.clamp(MIN_APPROVAL_PROBABILITY, MAX_APPROVAL_PROBABILITY)
}
