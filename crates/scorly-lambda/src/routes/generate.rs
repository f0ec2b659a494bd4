use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, State};
use serde::Serialize;
use tracing::info;

use scorly_audit::events::AuditEvent;
use scorly_auth::identity::Caller;
use scorly_core::models::report::Report;
use scorly_core::models::request::{GenerateReportParams, today_utc};

use crate::error::ApiError;
use crate::state::AppState;

const GENERATE_FAILED: &str = "Failed to generate report";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportResponse {
    pub success: bool,
    pub report_id: String,
    pub report: Report,
    pub message: &'static str,
}

/// `POST /generate-report`
///
/// Validates the request, asks the computation service for a new report and
/// returns the freshly created record. No retries: a failed procedure call
/// surfaces as a 500 with the original message in `details`.
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn generate_report(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> Result<Json<GenerateReportResponse>, ApiError> {
    let params: GenerateReportParams = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;

    let request = params.validate(today_utc())?;
    let report_type = request.report_type.as_str();

    let report_id = match state.computation.generate(&caller, &request).await {
        Ok(id) => id,
        Err(e) => {
            AuditEvent::report_generation_failed(&caller.id, report_type, &e.to_string()).emit();
            return Err(ApiError::from(e).in_context(GENERATE_FAILED));
        }
    };

    let report = state
        .store
        .fetch(&caller, &report_id)
        .await
        .map_err(|e| ApiError::from(e).in_context(GENERATE_FAILED))?
        .ok_or_else(|| {
            ApiError::internal(format!("report {report_id} missing after generation"))
                .in_context(GENERATE_FAILED)
        })?;

    info!(report_id = %report_id, report_type, status = %report.status, "report generated");
    AuditEvent::report_generated(&report_id, &caller.id, report_type).emit();

    Ok(Json(GenerateReportResponse {
        success: true,
        report_id,
        report,
        message: "Report generated successfully",
    }))
}
