use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mern_readiness::assessment::{AssessmentService, CatalogSet};
use mern_readiness::config::AppConfig;
use mern_readiness::error::AppError;
use mern_readiness::telemetry;
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

    let catalogs = CatalogSet::standard()?;
    let store = Arc::new(InMemorySessionStore::with_capacity(
        config.sessions.max_sessions,
    ));
    let assessment_service = Arc::new(AssessmentService::new(store, catalogs));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_sessions = config.sessions.max_sessions,
        "mern readiness assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
