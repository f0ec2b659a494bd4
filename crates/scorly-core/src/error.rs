use jiff::civil::Date;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: Date, to: Date },

    #[error("unsupported report type: {0}")]
    UnsupportedReportType(String),

    #[error("unsupported report format: {0}")]
    UnsupportedFormat(String),
}
