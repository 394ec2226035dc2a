use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryItemSource, InMemorySettingsRepository};
use crate::routes::with_alert_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cronos::alerts::{ComplianceAlertService, CsvItemImporter, TenantId};
use cronos::catalog::ComplianceCatalog;
use cronos::config::AppConfig;
use cronos::error::AppError;
use cronos::telemetry;
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

    let source = Arc::new(InMemoryItemSource::default());
    if let (Some(path), Some(tenant)) = (args.items_csv.take(), args.tenant.take()) {
        let items = CsvItemImporter::from_path(&path, &ComplianceCatalog::standard())?;
        info!(%tenant, items = items.len(), path = %path.display(), "seeded tracked items");
        source.replace(TenantId(tenant), items);
    }

    let settings = Arc::new(InMemorySettingsRepository::default());
    let alert_service = Arc::new(ComplianceAlertService::new(
        source,
        settings,
        &config.alerts,
    ));

    let app = with_alert_routes(alert_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        windows = ?config.alerts.default_windows,
        boundary = ?config.alerts.expiry_boundary,
        "cronos alert service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
