use std::sync::Arc;

use axum::http::StatusCode;
use kaiden_funding::funding::{
    funding_router, EngineConfig, FundingRecommendationService, OptimizationMode,
    RecommendationRequest, StaticCatalog,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn request_payload(mode: Option<&str>) -> Value {
    json!({
        "profile": {
            "id": "profile_42",
            "user_id": "user_42",
            "track": "business",
            "target_amount": 150000.0,
            "urgency": "medium",
            "purpose": "Expand operations, hire team, and increase marketing",
            "readiness_score": 68.0,
            "intake_completed": true
        },
        "user": {
            "id": "user_42",
            "email": "founder@example.com",
            "phone": "+1 (555) 123-4567",
            "email_verified": true,
            "phone_verified": true,
            "trust_score": { "score": 72.0, "level": "medium" },
            "profile": {
                "first_name": "Alex",
                "last_name": "Chen",
                "business_name": "TechFlow Solutions LLC",
                "entity_type": "llc",
                "credit_tier": "good",
                "annual_revenue": 450000.0,
                "monthly_revenue": 37500.0,
                "time_in_business": 18,
                "industry": "Software & Technology",
                "state": "California",
                "funding_track": ["business"]
            }
        },
        "mode": mode
    })
}

fn service(mode: OptimizationMode) -> FundingRecommendationService<StaticCatalog> {
    FundingRecommendationService::new(
        Arc::new(StaticCatalog::bundled()),
        EngineConfig::with_mode(mode),
    )
}

#[test]
fn sample_applicant_receives_three_ranked_options() {
    let request: RecommendationRequest =
        serde_json::from_value(request_payload(None)).expect("request parses");

    let set = service(OptimizationMode::Balanced)
        .recommend(&request)
        .expect("recommendations generated");

    let ids: Vec<&str> = set
        .recommendations
        .iter()
        .map(|recommendation| recommendation.source.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["source_5", "source_3", "source_1"]);

    let fast_track = set
        .recommendations
        .iter()
        .find(|recommendation| recommendation.source.id.0 == "source_1")
        .expect("fast track line offered");
    assert!((fast_track.approval_probability - 0.95).abs() < 1e-9);
    assert!((fast_track.speed - 1.5).abs() < 1e-9);
    assert!((fast_track.net_cost - 54_000.0).abs() < 1e-6);
    assert!(fast_track.explanation.starts_with("Excellent match"));
    assert!(fast_track
        .next_actions
        .contains(&"Connect business bank account".to_string()));
}

#[test]
fn sba_loan_is_withheld_until_two_years_in_business() {
    let mut request: RecommendationRequest =
        serde_json::from_value(request_payload(None)).expect("request parses");
    let service = service(OptimizationMode::LowestCost);

    let set = service.recommend(&request).expect("recommendations generated");
    assert!(set
        .recommendations
        .iter()
        .all(|recommendation| recommendation.source.id.0 != "source_2"));

    request.user.profile.time_in_business = Some(30);
    let set = service.recommend(&request).expect("recommendations generated");
    let sba = set
        .recommendations
        .iter()
        .find(|recommendation| recommendation.source.id.0 == "source_2")
        .expect("SBA loan offered after 24 months");
    assert!(sba
        .tradeoffs
        .contains(&"Longer timeline, but typically lower rates".to_string()));
}

#[tokio::test]
async fn http_round_trip_honors_requested_mode() {
    let router = funding_router(Arc::new(service(OptimizationMode::Balanced)));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/funding/recommendations")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&request_payload(Some("fastest-money"))).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");

    assert_eq!(payload["mode"], json!("fastest-money"));
    let ranks: Vec<i64> = payload["recommendations"]
        .as_array()
        .expect("recommendations array")
        .iter()
        .filter_map(|recommendation| recommendation["rank"].as_i64())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}
