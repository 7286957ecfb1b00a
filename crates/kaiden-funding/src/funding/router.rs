use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::catalog::SourceCatalog;
use super::service::{FundingRecommendationService, RecommendationRequest};
use crate::error::AppError;

/// Router builder exposing the ranking and catalog endpoints.
pub fn funding_router<C>(service: Arc<FundingRecommendationService<C>>) -> Router
where
    C: SourceCatalog + 'static,
{
    Router::new()
        .route(
            "/api/v1/funding/recommendations",
            post(recommend_handler::<C>),
        )
        .route("/api/v1/funding/sources", get(sources_handler::<C>))
        .with_state(service)
}

pub(crate) async fn recommend_handler<C>(
    State(service): State<Arc<FundingRecommendationService<C>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    C: SourceCatalog + 'static,
{
    match service.recommend(&request) {
        Ok(set) => (StatusCode::OK, axum::Json(set)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn sources_handler<C>(
    State(service): State<Arc<FundingRecommendationService<C>>>,
) -> Response
where
    C: SourceCatalog + 'static,
{
    match service.sources() {
        Ok(sources) => (StatusCode::OK, axum::Json(sources)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
