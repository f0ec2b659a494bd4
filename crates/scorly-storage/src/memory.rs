use std::collections::HashMap;

use async_trait::async_trait;
use jiff::{Timestamp, ToSpan};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use scorly_auth::error::AuthError;
use scorly_auth::identity::{Caller, IdentityProvider, RoleDirectory};
use scorly_core::models::report::{Report, ReportStatus, ReportType};
use scorly_core::models::request::ReportRequest;
use scorly_core::models::role::UserRole;
use scorly_core::models::template::ReportTemplate;

use crate::backend::{ReportComputation, ReportStore, TemplateCatalog, generation_procedure};
use crate::error::BackendError;

/// How long a generated report stays downloadable.
const RETENTION_HOURS: i64 = 30 * 24;

/// In-process stand-in for the Supabase project.
///
/// Holds users (by bearer token), role rows, report records and templates.
/// Listing follows the dashboard's row policy: callers see their own
/// reports, elevated roles see every report, and only owners delete. Generated
/// reports complete immediately with a payload taken from
/// [`MemoryBackend::with_payload`], or an empty payload of the right shape.
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    tokens: HashMap<String, Caller>,
    roles: HashMap<String, UserRole>,
    reports: HashMap<String, Report>,
    payloads: HashMap<ReportType, Value>,
    templates: Vec<ReportTemplate>,
    generation_failure: Option<String>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Accept `token` as the credential of user `user_id`.
    pub fn with_user(mut self, token: &str, user_id: &str) -> Self {
        self.state
            .get_mut()
            .tokens
            .insert(token.to_string(), Caller::new(user_id, token));
        self
    }

    pub fn with_role(mut self, user_id: &str, role: UserRole) -> Self {
        self.state.get_mut().roles.insert(user_id.to_string(), role);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.state
            .get_mut()
            .reports
            .insert(report.id.clone(), report);
        self
    }

    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.state.get_mut().templates.push(template);
        self
    }

    /// Payload stored as `generated_data` for newly generated reports of this type.
    pub fn with_payload(mut self, report_type: ReportType, payload: Value) -> Self {
        self.state.get_mut().payloads.insert(report_type, payload);
        self
    }

    /// Make every generation call fail with `message`.
    pub fn with_generation_failure(mut self, message: &str) -> Self {
        self.state.get_mut().generation_failure = Some(message.to_string());
        self
    }

    pub async fn report(&self, report_id: &str) -> Option<Report> {
        self.state.lock().await.reports.get(report_id).cloned()
    }

    pub async fn report_count(&self) -> usize {
        self.state.lock().await.reports.len()
    }
}

fn empty_payload(report_type: ReportType) -> Value {
    match report_type {
        ReportType::CreditScoreSummary => json!({ "score_history": [] }),
        ReportType::FinancialOverview => json!({ "monthly_breakdown": [] }),
        ReportType::AuditTrail => json!({ "audit_events": [] }),
        ReportType::PaymentHistory
        | ReportType::UserActivity
        | ReportType::BankPortfolio
        | ReportType::SystemAnalytics => json!({}),
    }
}

fn title(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::CreditScoreSummary => "Credit Score Summary",
        ReportType::FinancialOverview => "Financial Overview",
        ReportType::PaymentHistory => "Payment History",
        ReportType::AuditTrail => "Audit Trail",
        ReportType::UserActivity => "User Activity",
        ReportType::BankPortfolio => "Bank Portfolio",
        ReportType::SystemAnalytics => "System Analytics",
    }
}

#[async_trait]
impl IdentityProvider for MemoryBackend {
    async fn authenticate(&self, access_token: &str) -> Result<Caller, AuthError> {
        self.state
            .lock()
            .await
            .tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

#[async_trait]
impl RoleDirectory for MemoryBackend {
    async fn role_of(&self, caller: &Caller) -> Result<Option<UserRole>, AuthError> {
        Ok(self.state.lock().await.roles.get(&caller.id).cloned())
    }
}

#[async_trait]
impl ReportComputation for MemoryBackend {
    async fn generate(
        &self,
        caller: &Caller,
        request: &ReportRequest,
    ) -> Result<String, BackendError> {
        let procedure = generation_procedure(request.report_type)?;
        let mut state = self.state.lock().await;

        if let Some(message) = &state.generation_failure {
            return Err(BackendError::Procedure {
                procedure: procedure.to_string(),
                message: message.clone(),
            });
        }

        let now = Timestamp::now();
        let expires_at = now
            .checked_add(RETENTION_HOURS.hours())
            .map_err(|e| BackendError::Config(e.to_string()))?;
        let payload = state
            .payloads
            .get(&request.report_type)
            .cloned()
            .unwrap_or_else(|| empty_payload(request.report_type));

        let id = Uuid::new_v4().to_string();
        let report = Report {
            id: id.clone(),
            user_id: caller.id.clone(),
            report_type: request.report_type,
            report_format: request.format,
            status: ReportStatus::Completed,
            title: title(request.report_type).to_string(),
            description: Some(format!(
                "{} from {} to {}",
                title(request.report_type),
                request.window.from(),
                request.window.to()
            )),
            parameters: Some(json!({
                "date_from": request.window.from().to_string(),
                "date_to": request.window.to().to_string(),
                "format": request.format.as_str(),
            })),
            generated_data: Some(payload),
            file_url: None,
            file_size_bytes: None,
            generated_by: Some(caller.id.clone()),
            date_from: Some(request.window.from()),
            date_to: Some(request.window.to()),
            created_at: now,
            completed_at: Some(now),
            expires_at: Some(expires_at),
            download_count: Some(0),
            last_downloaded_at: None,
        };

        info!(procedure, report_id = %id, "generated in-memory report");
        state.reports.insert(id.clone(), report);
        Ok(id)
    }
}

#[async_trait]
impl ReportStore for MemoryBackend {
    async fn list(&self, caller: &Caller) -> Result<Vec<Report>, BackendError> {
        let state = self.state.lock().await;
        let sees_all = state
            .roles
            .get(&caller.id)
            .is_some_and(|r| r.role.has_cross_tenant_read());

        let mut reports: Vec<Report> = state
            .reports
            .values()
            .filter(|r| sees_all || r.user_id == caller.id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn fetch(&self, _caller: &Caller, report_id: &str) -> Result<Option<Report>, BackendError> {
        Ok(self.state.lock().await.reports.get(report_id).cloned())
    }

    async fn delete(&self, caller: &Caller, report_id: &str) -> Result<bool, BackendError> {
        let mut state = self.state.lock().await;
        let owned = state
            .reports
            .get(report_id)
            .is_some_and(|r| r.user_id == caller.id);
        if owned {
            state.reports.remove(report_id);
        }
        Ok(owned)
    }

    async fn mark_downloaded(&self, _caller: &Caller, report_id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        let report = state
            .reports
            .get_mut(report_id)
            .ok_or_else(|| BackendError::NotFound(report_id.to_string()))?;
        report.download_count = Some(report.download_count() + 1);
        report.last_downloaded_at = Some(Timestamp::now());
        Ok(())
    }
}

#[async_trait]
impl TemplateCatalog for MemoryBackend {
    async fn active_templates(&self, _caller: &Caller) -> Result<Vec<ReportTemplate>, BackendError> {
        let state = self.state.lock().await;
        let mut templates: Vec<ReportTemplate> = state
            .templates
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }
}
