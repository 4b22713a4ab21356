use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use postroom::config::AppConfig;
use postroom::error::AppError;
use postroom::intake::{MailSettings, SubmissionService, ValidationPolicy};
use postroom::mailer::ResendMailer;
use postroom::telemetry;
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

    let api_key = config.mail.require_api_key()?.to_string();
    let mailer = Arc::new(ResendMailer::from_config(&config.mail, api_key)?);
    let service = Arc::new(SubmissionService::new(
        mailer,
        ValidationPolicy::default(),
        MailSettings::from(&config.mail),
    ));

    let app = with_intake_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "form intake relay ready");

    axum::serve(listener, app).await?;
    Ok(())
}
