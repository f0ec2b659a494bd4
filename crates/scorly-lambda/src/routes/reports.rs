use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tracing::info;

use scorly_audit::events::AuditEvent;
use scorly_auth::identity::Caller;
use scorly_core::models::report::Report;
use scorly_core::models::template::ReportTemplate;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /reports`: the caller's reports, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = state
        .store
        .list(&caller)
        .await
        .map_err(|e| ApiError::from(e).in_context("Failed to list reports"))?;
    Ok(Json(reports))
}

/// `DELETE /reports/{report_id}`
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(report_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .store
        .delete(&caller, report_id.trim())
        .await
        .map_err(|e| ApiError::from(e).in_context("Failed to delete report"))?;

    if !deleted {
        return Err(ApiError::NotFound("Report not found".to_string()));
    }

    info!(report_id = %report_id, "report deleted");
    AuditEvent::report_deleted(&report_id, &caller.id).emit();
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /report-templates`: active templates ordered by name.
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<ReportTemplate>>, ApiError> {
    let templates = state
        .templates
        .active_templates(&caller)
        .await
        .map_err(|e| ApiError::from(e).in_context("Failed to list report templates"))?;
    Ok(Json(templates))
}
