use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use tracing::{info, warn};

use reclaim::config::AppConfig;
use reclaim::error::AppError;
use reclaim::telemetry;
use reclaim::tracking::assessments::{AssessmentService, QuestionBank, SelectionConfig};
use reclaim::tracking::checkins::CheckinService;
use reclaim::tracking::reminders::ReminderSweep;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCheckinStore, InMemoryProfileStore, InMemoryReminderQueue,
    InMemoryResultHistory, LogNotifier,
};
use crate::routes::app_router;

const REMINDER_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

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

    let bank = Arc::new(QuestionBank::standard()?);
    let profiles = Arc::new(InMemoryProfileStore::default());
    let history = Arc::new(InMemoryResultHistory::default());
    let checkin_store = Arc::new(InMemoryCheckinStore::default());

    let assessments = Arc::new(AssessmentService::new(
        bank,
        SelectionConfig::default(),
        profiles,
        history,
        checkin_store.clone(),
    ));
    let checkins = Arc::new(CheckinService::new(checkin_store.clone()));

    let reminder_queue = Arc::new(InMemoryReminderQueue::new(
        checkin_store,
        config.reminders.default_hour,
    ));
    let sweep = ReminderSweep::new(reminder_queue, Arc::new(LogNotifier));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REMINDER_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(error) = sweep.sweep(Local::now().naive_local()) {
                warn!(%error, "reminder sweep failed");
            }
        }
    });

    let app = app_router(assessments, checkins)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tracking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
