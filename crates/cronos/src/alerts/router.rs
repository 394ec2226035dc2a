use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Bucket, TenantId};
use super::service::{AlertServiceError, ComplianceAlertService};
use super::settings::{SettingsError, SettingsRepository};
use super::source::ItemSource;
use super::views::AlertSummary;
use super::windows::WindowSettingsUpdate;

/// Router builder exposing alert summaries, alert listings, and window settings.
pub fn alert_router<S, R>(service: Arc<ComplianceAlertService<S, R>>) -> Router
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/tenants/:tenant_id/alerts/summary",
            get(summary_handler::<S, R>),
        )
        .route("/api/v1/tenants/:tenant_id/alerts", get(alerts_handler::<S, R>))
        .route(
            "/api/v1/tenants/:tenant_id/settings/alert-windows",
            get(settings_handler::<S, R>).put(update_settings_handler::<S, R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlertQuery {
    #[serde(default)]
    pub(crate) bucket: Option<Bucket>,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    tenant_id: TenantId,
    summary: AlertSummary,
}

pub(crate) async fn summary_handler<S, R>(
    State(service): State<Arc<ComplianceAlertService<S, R>>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<AlertQuery>,
) -> Response
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    let tenant = TenantId(tenant_id);
    match service.summary(&tenant, query.as_of) {
        Ok(summary) => {
            let body = SummaryResponse {
                tenant_id: tenant,
                summary,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn alerts_handler<S, R>(
    State(service): State<Arc<ComplianceAlertService<S, R>>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<AlertQuery>,
) -> Response
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    let tenant = TenantId(tenant_id);
    match service.alerts(&tenant, query.bucket, query.as_of) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn settings_handler<S, R>(
    State(service): State<Arc<ComplianceAlertService<S, R>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    match service.settings(&TenantId(tenant_id)) {
        Ok(settings) => (StatusCode::OK, axum::Json(settings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_settings_handler<S, R>(
    State(service): State<Arc<ComplianceAlertService<S, R>>>,
    Path(tenant_id): Path<String>,
    axum::Json(update): axum::Json<WindowSettingsUpdate>,
) -> Response
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    match service.update_settings(&TenantId(tenant_id), update) {
        Ok(settings) => (StatusCode::OK, axum::Json(settings)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AlertServiceError) -> Response {
    match error {
        AlertServiceError::Settings(SettingsError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "violations": error.violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            tracing::error!(error = %other, "alert request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
