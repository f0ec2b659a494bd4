use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A persisted report row.
///
/// Field names follow the `reports` table so a row fetched from the store
/// can be handed back to the dashboard untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: String,
    /// The identity that requested the report.
    pub user_id: String,
    pub report_type: ReportType,
    #[serde(default)]
    pub report_format: ReportFormat,
    pub status: ReportStatus,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
    /// Computed payload. Shape depends on `report_type`.
    #[serde(default)]
    pub generated_data: Option<serde_json::Value>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<i64>,
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub date_from: Option<Date>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub date_to: Option<Date>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub download_count: Option<i64>,
    #[serde(default)]
    pub last_downloaded_at: Option<Timestamp>,
}

impl Report {
    /// Stored download count, treating a missing value as zero.
    pub fn download_count(&self) -> i64 {
        self.download_count.unwrap_or(0)
    }

    /// Only completed reports carry content that can be exported.
    pub fn is_downloadable(&self) -> bool {
        self.status == ReportStatus::Completed
    }
}

/// The fixed set of report shapes known to the report store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportType {
    CreditScoreSummary,
    FinancialOverview,
    PaymentHistory,
    AuditTrail,
    UserActivity,
    BankPortfolio,
    SystemAnalytics,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::CreditScoreSummary => "credit_score_summary",
            ReportType::FinancialOverview => "financial_overview",
            ReportType::PaymentHistory => "payment_history",
            ReportType::AuditTrail => "audit_trail",
            ReportType::UserActivity => "user_activity",
            ReportType::BankPortfolio => "bank_portfolio",
            ReportType::SystemAnalytics => "system_analytics",
        }
    }

    /// Whether the data computation service has a procedure for this type.
    /// The remaining variants are reserved.
    pub fn is_generatable(self) -> bool {
        matches!(
            self,
            ReportType::CreditScoreSummary | ReportType::FinancialOverview | ReportType::AuditTrail
        )
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_score_summary" => Ok(ReportType::CreditScoreSummary),
            "financial_overview" => Ok(ReportType::FinancialOverview),
            "payment_history" => Ok(ReportType::PaymentHistory),
            "audit_trail" => Ok(ReportType::AuditTrail),
            "user_activity" => Ok(ReportType::UserActivity),
            "bank_portfolio" => Ok(ReportType::BankPortfolio),
            "system_analytics" => Ok(ReportType::SystemAnalytics),
            other => Err(CoreError::UnsupportedReportType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, as the dashboard sends whatever the user picked.
impl FromStr for ReportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => Err(CoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportStatus {
    Pending,
    Generating,
    Completed,
    Failed,
    Expired,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Generating => "generating",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
            ReportStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
