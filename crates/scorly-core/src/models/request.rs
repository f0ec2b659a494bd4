use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::report::{ReportFormat, ReportType};
use crate::error::CoreError;

/// Length of the window used when the caller gives no dates.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Body of a generate-report call, exactly as the dashboard sends it.
///
/// Everything is optional and stringly typed here; [`GenerateReportParams::validate`]
/// turns it into a [`ReportRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerateReportParams {
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// A validated report request. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub report_type: ReportType,
    pub window: DateWindow,
    pub format: ReportFormat,
}

/// An inclusive calendar-date range with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    from: Date,
    to: Date,
}

impl DateWindow {
    pub fn new(from: Date, to: Date) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Date {
        self.from
    }

    pub fn to(&self) -> Date {
        self.to
    }
}

impl GenerateReportParams {
    /// Validate against `today` (UTC), filling in the default window.
    ///
    /// Checks run in a fixed order: report type present, dates, format,
    /// then whether the type can be generated at all.
    pub fn validate(&self, today: Date) -> Result<ReportRequest, CoreError> {
        let raw_type = self
            .report_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(CoreError::MissingField("reportType"))?;

        let from = match non_blank(&self.date_from) {
            Some(raw) => parse_calendar_date(raw)?,
            None => today
                .checked_sub(DEFAULT_WINDOW_DAYS.days())
                .map_err(|e| CoreError::InvalidDate(e.to_string()))?,
        };
        let to = match non_blank(&self.date_to) {
            Some(raw) => parse_calendar_date(raw)?,
            None => today,
        };
        let window = DateWindow::new(from, to)?;

        let format = match non_blank(&self.format) {
            Some(raw) => raw.parse::<ReportFormat>()?,
            None => ReportFormat::default(),
        };

        let report_type = raw_type.parse::<ReportType>()?;
        if !report_type.is_generatable() {
            return Err(CoreError::UnsupportedReportType(raw_type.to_string()));
        }

        Ok(ReportRequest {
            report_type,
            window,
            format,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse either a calendar date (`2024-01-01`) or an RFC 3339 timestamp.
/// Timestamps resolve to their UTC calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<Date, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts.to_zoned(TimeZone::UTC).date());
    }
    raw.parse::<Date>()
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Today's calendar date in UTC.
pub fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}
