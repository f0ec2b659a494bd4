use scorly_core::models::report::{ReportFormat, ReportType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{report_type} payload has an unexpected shape: {reason}")]
    UnexpectedShape {
        report_type: ReportType,
        reason: String,
    },

    #[error("reports cannot be downloaded as {0}")]
    UnsupportedFormat(ReportFormat),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
