use jiff::civil::date;

use scorly_core::error::CoreError;
use scorly_core::models::report::{ReportFormat, ReportType};
use scorly_core::models::request::{GenerateReportParams, parse_calendar_date};

fn params(report_type: &str) -> GenerateReportParams {
    GenerateReportParams {
        report_type: Some(report_type.to_string()),
        ..Default::default()
    }
}

#[test]
fn explicit_window_is_kept() {
    let req = GenerateReportParams {
        report_type: Some("credit_score_summary".to_string()),
        date_from: Some("2024-01-01".to_string()),
        date_to: Some("2024-01-31".to_string()),
        format: None,
    }
    .validate(date(2026, 10, 19))
    .unwrap();

    assert_eq!(req.report_type, ReportType::CreditScoreSummary);
    assert_eq!(req.window.from(), date(2024, 1, 1));
    assert_eq!(req.window.to(), date(2024, 1, 31));
    assert_eq!(req.format, ReportFormat::Json);
}

#[test]
fn missing_dates_default_to_trailing_year() {
    let req = params("audit_trail").validate(date(2024, 3, 1)).unwrap();
    assert_eq!(req.window.from(), date(2023, 3, 2));
    assert_eq!(req.window.to(), date(2024, 3, 1));
}

#[test]
fn single_day_window_is_valid() {
    let mut p = params("financial_overview");
    p.date_from = Some("2024-05-05".to_string());
    p.date_to = Some("2024-05-05".to_string());
    assert!(p.validate(date(2024, 6, 1)).is_ok());
}

#[test]
fn inverted_window_is_rejected() {
    let mut p = params("credit_score_summary");
    p.date_from = Some("2024-02-01".to_string());
    p.date_to = Some("2024-01-01".to_string());
    assert!(matches!(
        p.validate(date(2024, 6, 1)),
        Err(CoreError::InvalidDateRange { .. })
    ));
}

#[test]
fn missing_or_blank_report_type_is_rejected() {
    let empty = GenerateReportParams::default();
    assert!(matches!(
        empty.validate(date(2024, 6, 1)),
        Err(CoreError::MissingField("reportType"))
    ));
    assert!(matches!(
        params("   ").validate(date(2024, 6, 1)),
        Err(CoreError::MissingField(_))
    ));
}

#[test]
fn unknown_and_reserved_types_are_unsupported() {
    for raw in ["bogus", "user_activity", "system_analytics"] {
        assert!(
            matches!(
                params(raw).validate(date(2024, 6, 1)),
                Err(CoreError::UnsupportedReportType(_))
            ),
            "{raw} should be unsupported"
        );
    }
}

#[test]
fn date_range_is_checked_before_report_type() {
    let mut p = params("bogus");
    p.date_from = Some("2024-02-01".to_string());
    p.date_to = Some("2024-01-01".to_string());
    assert!(matches!(
        p.validate(date(2024, 6, 1)),
        Err(CoreError::InvalidDateRange { .. })
    ));
}

#[test]
fn format_is_case_insensitive() {
    let mut p = params("audit_trail");
    p.format = Some("CSV".to_string());
    assert_eq!(p.validate(date(2024, 6, 1)).unwrap().format, ReportFormat::Csv);

    p.format = Some("xlsx".to_string());
    assert!(matches!(
        p.validate(date(2024, 6, 1)),
        Err(CoreError::UnsupportedFormat(_))
    ));
}

#[test]
fn timestamps_resolve_to_utc_date() {
    assert_eq!(
        parse_calendar_date("2024-01-01T23:30:00-05:00").unwrap(),
        date(2024, 1, 2)
    );
    assert_eq!(parse_calendar_date("2024-07-04").unwrap(), date(2024, 7, 4));
    assert!(parse_calendar_date("yesterday").is_err());
}

#[test]
fn params_deserialize_from_camel_case() {
    let p: GenerateReportParams = serde_json::from_str(
        r#"{"reportType":"financial_overview","dateFrom":"2024-01-01","format":"csv"}"#,
    )
    .unwrap();
    assert_eq!(p.report_type.as_deref(), Some("financial_overview"));
    assert_eq!(p.date_from.as_deref(), Some("2024-01-01"));
    assert!(p.date_to.is_none());
}
