use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use cronos::alerts::{
    alert_router, AlertAggregator, AlertReport, Bucket, ComplianceAlertService, CsvItemImporter,
    ExpiryBoundary, ItemSource, SettingsRepository, WindowSettings, DEFAULT_WINDOWS,
};
use cronos::catalog::ComplianceCatalog;
use cronos::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Ad-hoc report over an uploaded export, independent of any tenant.
#[derive(Debug, Deserialize)]
pub(crate) struct AlertReportRequest {
    pub(crate) items_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) bucket: Option<Bucket>,
    #[serde(default)]
    pub(crate) windows: Option<WindowSettings>,
    #[serde(default)]
    pub(crate) expiry_boundary: Option<ExpiryBoundary>,
}

pub(crate) fn with_alert_routes<S, R>(service: Arc<ComplianceAlertService<S, R>>) -> axum::Router
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    alert_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/alerts/report",
            axum::routing::post(alert_report_endpoint),
        )
        .route("/api/v1/catalog", axum::routing::get(catalog_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint() -> Json<ComplianceCatalog> {
    Json(ComplianceCatalog::standard())
}

pub(crate) async fn alert_report_endpoint(
    Json(payload): Json<AlertReportRequest>,
) -> Result<Json<AlertReport>, AppError> {
    let AlertReportRequest {
        items_csv,
        as_of,
        bucket,
        windows,
        expiry_boundary,
    } = payload;

    let windows = windows.unwrap_or(DEFAULT_WINDOWS);
    windows.validate()?;

    let catalog = ComplianceCatalog::standard();
    let items = CsvItemImporter::from_reader(Cursor::new(items_csv.into_bytes()), &catalog)?;
    let aggregator = AlertAggregator::new(windows, expiry_boundary.unwrap_or_default())?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    Ok(Json(aggregator.aggregate(&items, as_of, bucket)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryItemSource, InMemorySettingsRepository};
    use axum::body::Body;
    use axum::http::Request;
    use cronos::config::AlertConfig;
    use tower::ServiceExt;

    const EXPORT: &str = "id,category,label,employee,reference_date,validity_days,kind\n\
aso-01,aso,,Ana Souza,2023-06-03,,periodic\n\
nr35-01,training,,Bruno Reis,2022-06-22,,NR-35\n";

    fn request(windows: Option<WindowSettings>) -> AlertReportRequest {
        AlertReportRequest {
            items_csv: EXPORT.to_string(),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1),
            bucket: None,
            windows,
            expiry_boundary: None,
        }
    }

    #[tokio::test]
    async fn alert_report_endpoint_classifies_uploaded_items() {
        let Json(report) = alert_report_endpoint(Json(request(None)))
            .await
            .expect("report builds");

        assert_eq!(report.summary.due30, 2);
        assert_eq!(report.items[0].id.0, "aso-01");
        assert_eq!(report.items[0].days_to_due, 1);
        assert_eq!(report.items[1].label, "NR-35 Trabalho em Altura");
    }

    #[tokio::test]
    async fn alert_report_endpoint_rejects_non_positive_windows() {
        let windows = WindowSettings {
            window30: 0,
            window60: 60,
            window90: 90,
        };
        let error = alert_report_endpoint(Json(request(Some(windows))))
            .await
            .expect_err("zero window rejected");

        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn alert_report_endpoint_rejects_unknown_category() {
        let mut payload = request(None);
        payload.items_csv.push_str("x-01,vehicle,,,2024-01-01,365,\n");

        let error = alert_report_endpoint(Json(payload))
            .await
            .expect_err("unknown category rejected");

        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn composed_router_serves_tenant_and_static_routes() {
        let service = Arc::new(ComplianceAlertService::new(
            Arc::new(InMemoryItemSource::default()),
            Arc::new(InMemorySettingsRepository::default()),
            &AlertConfig::default(),
        ));
        let router = with_alert_routes(service);

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let catalog = router
            .clone()
            .oneshot(Request::get("/api/v1/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(catalog.status(), StatusCode::OK);

        let settings = router
            .oneshot(
                Request::get("/api/v1/tenants/acme/settings/alert-windows")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(settings.status(), StatusCode::OK);
    }
}
