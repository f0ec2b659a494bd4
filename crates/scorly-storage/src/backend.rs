use async_trait::async_trait;
use scorly_auth::identity::Caller;
use scorly_core::models::report::{Report, ReportType};
use scorly_core::models::request::ReportRequest;
use scorly_core::models::template::ReportTemplate;

use crate::error::BackendError;

/// The external service that computes report content.
///
/// One call creates exactly one report record and returns its id. The
/// record may still be `generating` when this returns.
#[async_trait]
pub trait ReportComputation: Send + Sync {
    async fn generate(&self, caller: &Caller, request: &ReportRequest)
    -> Result<String, BackendError>;
}

/// Access to report records, plus the download counter.
///
/// Every call runs as `caller`; which rows are visible or deletable is the
/// store's row-level policy.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Reports visible to the caller, newest first.
    async fn list(&self, caller: &Caller) -> Result<Vec<Report>, BackendError>;

    /// `Ok(None)` when no report with this id is visible to the caller.
    async fn fetch(&self, caller: &Caller, report_id: &str) -> Result<Option<Report>, BackendError>;

    /// Remove a report. `Ok(false)` when nothing the caller may delete matched.
    async fn delete(&self, caller: &Caller, report_id: &str) -> Result<bool, BackendError>;

    /// Atomically bump `download_count` and stamp `last_downloaded_at`.
    async fn mark_downloaded(&self, caller: &Caller, report_id: &str) -> Result<(), BackendError>;
}

/// The report presets shown by the dashboard.
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Active templates ordered by name.
    async fn active_templates(&self, caller: &Caller) -> Result<Vec<ReportTemplate>, BackendError>;
}

/// Remote procedure that generates each report type.
pub fn generation_procedure(report_type: ReportType) -> Result<&'static str, BackendError> {
    match report_type {
        ReportType::CreditScoreSummary => Ok("generate_credit_score_report"),
        ReportType::FinancialOverview => Ok("generate_financial_overview_report"),
        ReportType::AuditTrail => Ok("generate_audit_trail_report"),
        ReportType::PaymentHistory
        | ReportType::UserActivity
        | ReportType::BankPortfolio
        | ReportType::SystemAnalytics => Err(BackendError::UnsupportedReportType(report_type)),
    }
}

/// Procedure that marks a report downloaded.
pub const MARK_DOWNLOADED_PROCEDURE: &str = "mark_report_downloaded";
