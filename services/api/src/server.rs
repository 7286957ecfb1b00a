use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_funding_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kaiden_funding::config::AppConfig;
use kaiden_funding::error::AppError;
use kaiden_funding::funding::FundingRecommendationService;
use kaiden_funding::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(config.funding.catalog_path.as_deref())?);
    let source_count = catalog.len();
    let service = Arc::new(FundingRecommendationService::new(
        catalog,
        config.funding.engine_config(),
    ));

    let app = with_funding_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        mode = %config.funding.mode,
        sources = source_count,
        "funding recommendation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
