use serde::Serialize;
use tracing::info;

/// A structured audit event for a report action.
///
/// Emitted through `tracing`, so it lands wherever the subscriber writes
/// (JSON lines in production).
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: String,
    pub success: bool,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_id: user_id.into(),
            success: true,
            details: None,
        }
    }

    /// Event for a successful report generation.
    pub fn report_generated(report_id: &str, user_id: &str, report_type: &str) -> Self {
        Self::new("report_generated", "report", report_id, user_id)
            .with_details(serde_json::json!({ "report_type": report_type }))
    }

    /// Event for a generation request the computation service refused.
    ///
    /// No report exists yet, so the requested type stands in as the resource.
    pub fn report_generation_failed(user_id: &str, report_type: &str, error: &str) -> Self {
        Self::new("report_generation_failed", "report_type", report_type, user_id)
            .with_details(serde_json::json!({ "report_type": report_type, "error": error }))
            .failed()
    }

    /// Event for a deleted report.
    pub fn report_deleted(report_id: &str, user_id: &str) -> Self {
        Self::new("report_deleted", "report", report_id, user_id)
    }

    /// Event for a served download.
    pub fn report_downloaded(report_id: &str, user_id: &str, format: &str) -> Self {
        Self::new("report_downloaded", "report", report_id, user_id)
            .with_details(serde_json::json!({ "format": format }))
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_id = %self.user_id,
            audit.success = self.success,
            audit.details = %details,
            "audit event"
        );
    }
}
