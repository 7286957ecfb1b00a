use super::common::*;
use crate::funding::catalog::bundled_sources;
use crate::funding::domain::{FundingTrack, SourceId};
use crate::funding::engine::{
    generate_recommendations, is_eligible, score_source, EngineConfig, EngineError,
    FundingDecisionEngine, OptimizationMode,
};

fn ranked_ids(mode: OptimizationMode) -> Vec<String> {
    generate_recommendations(&profile(), &user(), &bundled_sources(), mode)
        .expect("ranking succeeds")
        .into_iter()
        .map(|recommendation| recommendation.source.id.0)
        .collect()
}

#[test]
fn fast_track_scenario_matches_expected_figures() {
    let recommendation = score_source(
        &fast_track_line(),
        &user(),
        &profile(),
        OptimizationMode::Balanced,
    );

    assert_close(recommendation.approval_probability, 0.95);
    assert_close(recommendation.speed, 1.5);
    assert_close(recommendation.net_cost, 54_000.0);
    assert_eq!(recommendation.score, 76);
    assert_eq!(recommendation.id, "rec_source_1");
    assert_close(recommendation.estimated_amount, 150_000.0);
}

#[test]
fn bundled_catalog_ranks_per_mode() {
    // SBA needs 24 months and the DSCR loan is real-estate only.
    assert_eq!(
        ranked_ids(OptimizationMode::Balanced),
        vec!["source_5", "source_3", "source_1"]
    );
    assert_eq!(
        ranked_ids(OptimizationMode::FastestMoney),
        vec!["source_5", "source_1", "source_3"]
    );
    assert_eq!(
        ranked_ids(OptimizationMode::LowestCost),
        vec!["source_5", "source_3", "source_1"]
    );
}

#[test]
fn ranks_are_contiguous_and_scores_descend() {
    let recommendations = generate_recommendations(
        &profile(),
        &user(),
        &bundled_sources(),
        OptimizationMode::FastestMoney,
    )
    .expect("ranking succeeds");

    assert_eq!(
        recommendations.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(recommendations
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(
        recommendations.iter().map(|r| r.score).collect::<Vec<_>>(),
        vec![87, 86, 85]
    );
}

#[test]
fn every_recommendation_passed_eligibility() {
    let sources = bundled_sources();
    let recommendations =
        generate_recommendations(&profile(), &user(), &sources, OptimizationMode::Balanced)
            .expect("ranking succeeds");

    for recommendation in &recommendations {
        assert!(is_eligible(&recommendation.source, &user(), &profile()));
        assert_eq!(recommendation.funding_profile_id, profile().id);
    }
}

#[test]
fn equal_scores_keep_catalog_order() {
    let sources = vec![
        plain_source("b"),
        plain_source("a"),
        plain_source("c"),
    ];
    let recommendations =
        generate_recommendations(&profile(), &user(), &sources, OptimizationMode::Balanced)
            .expect("ranking succeeds");

    let ids: Vec<&str> = recommendations
        .iter()
        .map(|r| r.source.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn empty_catalog_yields_empty_list() {
    let recommendations =
        generate_recommendations(&profile(), &user(), &[], OptimizationMode::Balanced);
    assert_eq!(recommendations, Ok(Vec::new()));
}

#[test]
fn no_eligible_sources_is_not_an_error() {
    let profile = profile_with(|profile| profile.track = FundingTrack::Creator);
    let sources = vec![fast_track_line(), sba_loan()];

    let recommendations =
        generate_recommendations(&profile, &user(), &sources, OptimizationMode::Balanced)
            .expect("ranking succeeds");
    assert!(recommendations.is_empty());
}

#[test]
fn rejects_non_positive_target_amount() {
    for amount in [0.0, -5_000.0, f64::NAN] {
        let profile = profile_with(|profile| profile.target_amount = amount);
        let err = generate_recommendations(
            &profile,
            &user(),
            &bundled_sources(),
            OptimizationMode::Balanced,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTargetAmount(_)));
    }
}

#[test]
fn rejects_inverted_amount_range() {
    let broken = source_with("broken", |source| {
        source.min_amount = 500_000.0;
        source.max_amount = 10_000.0;
    });

    let err = generate_recommendations(
        &profile(),
        &user(),
        &[fast_track_line(), broken],
        OptimizationMode::Balanced,
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidAmountRange {
            source_id: SourceId("broken".to_string()),
            min: 500_000.0,
            max: 10_000.0,
        }
    );
}

#[test]
fn engine_uses_configured_mode() {
    let engine = FundingDecisionEngine::new(EngineConfig::with_mode(OptimizationMode::LowestCost));
    assert_eq!(engine.mode(), OptimizationMode::LowestCost);

    let recommendations = engine
        .generate_recommendations(&profile(), &user(), &bundled_sources())
        .expect("ranking succeeds");
    assert_eq!(recommendations[0].score, 72);
}

#[test]
fn repeated_runs_are_identical() {
    let sources = bundled_sources();
    let first =
        generate_recommendations(&profile(), &user(), &sources, OptimizationMode::Balanced);
    let second =
        generate_recommendations(&profile(), &user(), &sources, OptimizationMode::Balanced);
    assert_eq!(first, second);
}
