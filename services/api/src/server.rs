use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRoundPublisher};
use crate::routes::with_lottery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use parking_lottery::config::AppConfig;
use parking_lottery::error::AppError;
use parking_lottery::telemetry;
use parking_lottery::workflows::lottery::LotteryService;
use parking_lottery::workflows::roster::load_session;
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

    let session = load_session(&config.lottery)?;
    let publisher = Arc::new(InMemoryRoundPublisher::default());
    let lottery_service = Arc::new(LotteryService::new(session, publisher, &config.lottery));

    let app = with_lottery_routes(lottery_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        strategy = config.lottery.default_strategy.label(),
        seeded = config.lottery.seed.is_some(),
        "parking lottery service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
