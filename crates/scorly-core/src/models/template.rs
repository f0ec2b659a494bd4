use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::report::ReportType;

/// A preset offered by the dashboard when requesting a report.
///
/// Mirrors the `report_templates` table. Only active templates are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportTemplate {
    pub id: String,
    pub name: String,
    pub report_type: ReportType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_parameters: Option<serde_json::Value>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl ReportTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            report_type,
            description: None,
            default_parameters: None,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
