use axum::extract::{Extension, Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use scorly_audit::events::AuditEvent;
use scorly_auth::access::authorize_read;
use scorly_auth::identity::Caller;
use scorly_core::models::report::ReportFormat;
use scorly_core::models::request::today_utc;
use scorly_export::artifact::{ExportArtifact, export_report};

use crate::error::ApiError;
use crate::state::AppState;

const DOWNLOAD_FAILED: &str = "Failed to download report";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// `GET /download-report/{report_id}?format=json|csv`
pub async fn download_report(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(report_id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    serve_download(&state, &caller, &report_id, query.format.as_deref())
        .await
        .map_err(|e| e.in_context(DOWNLOAD_FAILED))
}

/// `GET /download-report` with no id segment.
pub async fn missing_report_id() -> ApiError {
    ApiError::BadRequest("Report ID is required".to_string())
}

async fn serve_download(
    state: &AppState,
    caller: &Caller,
    report_id: &str,
    format: Option<&str>,
) -> Result<Response, ApiError> {
    let report_id = report_id.trim();
    if report_id.is_empty() {
        return Err(ApiError::BadRequest("Report ID is required".to_string()));
    }

    let format = match format.map(str::trim).filter(|f| !f.is_empty()) {
        None => ReportFormat::Json,
        Some(raw) => match raw.parse::<ReportFormat>() {
            Ok(f @ (ReportFormat::Json | ReportFormat::Csv)) => f,
            _ => return Err(ApiError::BadRequest("Unsupported download format".to_string())),
        },
    };

    let report = state
        .store
        .fetch(caller, report_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    let grant = authorize_read(caller, &report.user_id, state.roles.as_ref()).await?;

    if !report.is_downloadable() {
        return Err(ApiError::Conflict {
            message: "Report is not ready for download".to_string(),
            details: report.status.to_string(),
        });
    }

    // Render before counting, so a failed render never bumps the counter.
    let artifact = export_report(&report, format, today_utc())?;
    state.store.mark_downloaded(caller, report_id).await?;

    info!(report_id, format = %format, grant = ?grant, size = artifact.bytes.len(), "report downloaded");
    AuditEvent::report_downloaded(report_id, &caller.id, format.as_str()).emit();

    attachment(artifact)
}

fn attachment(artifact: ExportArtifact) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.filename
    ))
    .map_err(ApiError::internal)?;

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
