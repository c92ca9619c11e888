use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use appraisal::config::AppConfig;
use appraisal::error::AppError;
use appraisal::handbooks::HandbookRegistry;
use appraisal::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let registry = Arc::new(HandbookRegistry::builtin());
    if let Some(id) = config.worksheet.default_handbook.as_deref() {
        // Fail fast on a misconfigured default rather than on the first request.
        registry.require(id)?;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        registry,
        default_handbook: config.worksheet.default_handbook.clone(),
    };

    let app = router().layer(Extension(app_state)).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "appraisal worksheet service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
