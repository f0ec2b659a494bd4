//! Per-report-type flattening of `generated_data` into tables.

use serde_json::{Map, Value};
use tracing::warn;

use scorly_core::models::report::ReportType;

use crate::csv::Table;
use crate::error::ExportError;

pub const CREDIT_SCORE_COLUMNS: [&str; 9] = [
    "date",
    "score",
    "payment_history",
    "credit_utilization",
    "credit_history_length",
    "credit_mix",
    "new_credit",
    "income_factor",
    "status",
];

/// Source field in a `score_history` entry for each of [`CREDIT_SCORE_COLUMNS`].
const CREDIT_SCORE_SOURCES: [&str; 9] = [
    "calculation_date",
    "score",
    "payment_history_score",
    "credit_utilization_score",
    "credit_history_length_score",
    "credit_mix_score",
    "new_credit_score",
    "income_factor",
    "status",
];

pub const AUDIT_COLUMNS: [&str; 7] = [
    "timestamp",
    "action",
    "resource_type",
    "resource_id",
    "ip_address",
    "success",
    "error_message",
];

/// Flatten a payload into a table.
///
/// `Ok(None)` means the report type has no tabular form.
pub fn flatten(report_type: ReportType, data: &Value) -> Result<Option<Table>, ExportError> {
    match report_type {
        ReportType::CreditScoreSummary => {
            let entries = entries(report_type, data, "score_history")?;
            let mut table = Table::new(CREDIT_SCORE_COLUMNS);
            for entry in entries {
                let fields = as_object(report_type, entry)?;
                table.push_row(pick(fields, &CREDIT_SCORE_SOURCES));
            }
            Ok(Some(table))
        }
        ReportType::FinancialOverview => {
            let entries = entries(report_type, data, "monthly_breakdown")?;
            let Some(first) = entries.first() else {
                return Ok(Some(Table::default()));
            };
            let columns: Vec<String> = as_object(report_type, first)?.keys().cloned().collect();
            let keys: Vec<&str> = columns.iter().map(String::as_str).collect();
            let mut table = Table::new(keys.iter().copied());
            for entry in entries {
                let fields = as_object(report_type, entry)?;
                table.push_row(pick(fields, &keys));
            }
            Ok(Some(table))
        }
        ReportType::AuditTrail => {
            let entries = entries(report_type, data, "audit_events")?;
            let mut table = Table::new(AUDIT_COLUMNS);
            for entry in entries {
                let fields = as_object(report_type, entry)?;
                table.push_row(pick(fields, &AUDIT_COLUMNS));
            }
            Ok(Some(table))
        }
        ReportType::PaymentHistory
        | ReportType::UserActivity
        | ReportType::BankPortfolio
        | ReportType::SystemAnalytics => Ok(None),
    }
}

/// Render a payload as CSV, falling back to pretty-printed JSON when the
/// type has no tabular form or the payload does not fit its shape.
pub fn render_csv(report_type: ReportType, data: &Value) -> Result<String, ExportError> {
    match flatten(report_type, data) {
        Ok(Some(table)) if table.columns.is_empty() => Ok(String::new()),
        Ok(Some(table)) => Ok(table.to_csv()),
        Ok(None) => Ok(serde_json::to_string_pretty(data)?),
        Err(e) => {
            warn!(report_type = %report_type, error = %e, "falling back to raw JSON export");
            Ok(serde_json::to_string_pretty(data)?)
        }
    }
}

/// The list stored under `field`. A missing payload or field is an empty list.
fn entries<'a>(
    report_type: ReportType,
    data: &'a Value,
    field: &str,
) -> Result<&'a [Value], ExportError> {
    let object = match data {
        Value::Null => return Ok(&[]),
        Value::Object(object) => object,
        _ => return Err(shape(report_type, "payload is not an object")),
    };
    match object.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(shape(report_type, &format!("`{field}` is not a list"))),
    }
}

fn as_object(report_type: ReportType, entry: &Value) -> Result<&Map<String, Value>, ExportError> {
    entry
        .as_object()
        .ok_or_else(|| shape(report_type, "list entry is not an object"))
}

fn pick(fields: &Map<String, Value>, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .map(|k| fields.get(*k).cloned().unwrap_or(Value::Null))
        .collect()
}

fn shape(report_type: ReportType, reason: &str) -> ExportError {
    ExportError::UnexpectedShape {
        report_type,
        reason: reason.to_string(),
    }
}
