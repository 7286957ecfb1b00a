use super::common::*;
use crate::funding::domain::{
    CreditTier, FundingProfile, FundingSource, FundingSourceType, TrustScore, User,
};
use crate::funding::engine::rationale::{
    blockers, confidence, explanation, next_actions, tradeoffs, MAX_CONFIDENCE,
};
use crate::funding::engine::{
    estimate_approval_probability, parse_timeframe_days, Rationale, RationaleContext,
};

fn context<'a>(
    source: &'a FundingSource,
    user: &'a User,
    profile: &'a FundingProfile,
) -> RationaleContext<'a> {
    RationaleContext {
        source,
        user,
        profile,
        approval_probability: estimate_approval_probability(source, user, profile),
        speed_days: parse_timeframe_days(&source.approval_timeframe),
    }
}

#[test]
fn fast_track_rationale_for_sample_applicant() {
    let (source, user, profile) = (fast_track_line(), user(), profile());
    let rationale = Rationale::build(&context(&source, &user, &profile));

    assert_eq!(
        rationale.explanation,
        "Excellent match based on your profile, strong credit profile, \
         well-established business history, strong revenue performance."
    );
    assert_eq!(
        rationale.tradeoffs,
        vec!["Very fast approval, but may have higher costs".to_string()]
    );
    assert_eq!(
        rationale.next_actions,
        vec![
            "Connect business bank account".to_string(),
            "Complete credit authorization".to_string(),
        ]
    );
    assert!(rationale.blockers.is_empty());
    assert_close(rationale.confidence, MAX_CONFIDENCE);
}

#[test]
fn explanation_band_follows_probability() {
    let (source, user, profile) = (plain_source("band"), user(), profile());
    let mut ctx = context(&source, &user, &profile);

    ctx.approval_probability = 0.7;
    assert!(explanation(&ctx).starts_with("Good fit for your situation"));

    ctx.approval_probability = 0.4;
    assert!(explanation(&ctx).starts_with("Possible option with some limitations"));
}

#[test]
fn explanation_without_clauses_is_just_the_band() {
    let source = plain_source("bare");
    let user = user_with(|user| user.profile.credit_tier = CreditTier::Fair);
    let profile = profile();
    let mut ctx = context(&source, &user, &profile);
    ctx.approval_probability = 0.5;

    assert_eq!(explanation(&ctx), "Possible option with some limitations.");
}

#[test]
fn sba_loan_tradeoffs_cover_timeline_apr_and_paperwork() {
    let (source, user, profile) = (sba_loan(), user(), profile());
    let ctx = context(&source, &user, &profile);

    assert_eq!(
        tradeoffs(&ctx),
        vec![
            "Longer timeline, but typically lower rates".to_string(),
            "Low APR, but extensive documentation required".to_string(),
            "Comprehensive requirements may extend timeline".to_string(),
        ]
    );
}

#[test]
fn alternative_sources_flag_total_cost() {
    let (source, user, profile) = (revenue_based(), user(), profile());
    let ctx = context(&source, &user, &profile);

    assert_eq!(source.source_type, FundingSourceType::Alternative);
    assert!(tradeoffs(&ctx).contains(&"Flexible requirements, but higher total cost".to_string()));
}

#[test]
fn apr_tradeoff_needs_a_leading_number() {
    let source = source_with("prime", |source| {
        source.cost_structure.apr = Some("Prime + 2%".to_string());
    });
    let (user, profile) = (user(), profile());
    let ctx = context(&source, &user, &profile);

    assert!(!tradeoffs(&ctx)
        .iter()
        .any(|tradeoff| tradeoff.starts_with("Low APR")));
}

#[test]
fn next_actions_default_when_nothing_matches() {
    let (source, user, profile) = (plain_source("empty"), user(), profile());
    let ctx = context(&source, &user, &profile);

    assert_eq!(
        next_actions(&ctx),
        vec![
            "Review full requirements".to_string(),
            "Start application process".to_string(),
        ]
    );
}

#[test]
fn next_actions_cap_at_four() {
    let source = source_with("docs", |source| {
        source.requirements = vec![
            "Business checking account".to_string(),
            "Bank statement history".to_string(),
            "Soft credit pull".to_string(),
        ];
    });
    let user = user_with(|user| user.profile.business_name = None);
    let profile = profile();
    let actions = next_actions(&context(&source, &user, &profile));

    assert_eq!(actions.len(), 4);
    assert_eq!(actions[3], "Complete business profile");
}

#[test]
fn blockers_flag_low_trust_readiness_and_credit() {
    let source = sba_loan();
    let user = user_with(|user| {
        user.trust_score = TrustScore::from_score(45.0);
        user.profile.credit_tier = CreditTier::Fair;
    });
    let profile = profile_with(|profile| profile.readiness_score = 42.0);

    assert_eq!(
        blockers(&context(&source, &user, &profile)),
        vec![
            "Increase trust score to unlock faster processing".to_string(),
            "Improve readiness score for better approval odds".to_string(),
            "Credit score may need improvement".to_string(),
        ]
    );
}

#[test]
fn confidence_grows_with_reported_data() {
    let source = plain_source("confidence");
    let sparse = user_with(|user| {
        user.profile.annual_revenue = None;
        user.profile.time_in_business = None;
        user.phone_verified = false;
        user.trust_score = TrustScore::from_score(50.0);
    });
    let incomplete = profile_with(|profile| profile.intake_completed = false);
    assert_close(confidence(&context(&source, &sparse, &incomplete)), 0.7);

    let profile = profile();
    assert_close(confidence(&context(&source, &sparse, &profile)), 0.8);
}
