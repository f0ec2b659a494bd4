use jiff::civil::Date;
use serde_json::Value;
use tracing::debug;

use scorly_core::models::report::{Report, ReportFormat, ReportType};

use crate::envelope::ReportEnvelope;
use crate::error::ExportError;
use crate::flatten::render_csv;

/// A rendered report, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// `{report_type}_{YYYY-MM-DD}.{format}`
pub fn filename(report_type: ReportType, today: Date, format: ReportFormat) -> String {
    format!("{report_type}_{today}.{format}")
}

/// Render `report` for download.
///
/// Runs before the download is recorded, so a failed render never counts.
/// The JSON envelope's `download_count` still includes this download
/// (stored count plus one).
pub fn export_report(
    report: &Report,
    format: ReportFormat,
    today: Date,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ReportFormat::Json => ReportEnvelope::new(report, report.download_count() + 1).to_json()?,
        ReportFormat::Csv => {
            let data = report.generated_data.as_ref().unwrap_or(&Value::Null);
            render_csv(report.report_type, data)?.into_bytes()
        }
        ReportFormat::Pdf => return Err(ExportError::UnsupportedFormat(format)),
    };

    debug!(report_id = %report.id, format = %format, size = bytes.len(), "rendered export");

    Ok(ExportArtifact {
        bytes,
        filename: filename(report.report_type, today, format),
        content_type: format.content_type(),
    })
}
