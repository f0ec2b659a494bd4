use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use scorly_core::models::report::{Report, ReportType};

use crate::error::ExportError;

/// The JSON download document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub report_info: ReportInfo,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub report_type: ReportType,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    pub generated_at: Timestamp,
    pub download_count: i64,
}

impl ReportEnvelope {
    /// Wrap `report`. `download_count` is reported as given.
    pub fn new(report: &Report, download_count: i64) -> Self {
        Self {
            report_info: ReportInfo {
                id: report.id.clone(),
                title: report.title.clone(),
                description: report.description.clone(),
                report_type: report.report_type,
                date_from: report.date_from,
                date_to: report.date_to,
                generated_at: report.created_at,
                download_count,
            },
            data: report.generated_data.clone().unwrap_or(Value::Null),
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
