use jiff::Timestamp;
use jiff::civil::date;
use serde_json::{Value, json};

use scorly_core::models::report::{Report, ReportFormat, ReportStatus, ReportType};
use scorly_export::artifact::{export_report, filename};
use scorly_export::error::ExportError;
use scorly_export::flatten::{flatten, render_csv};

fn report(report_type: ReportType, data: Value) -> Report {
    Report {
        id: "r-1".to_string(),
        user_id: "u-1".to_string(),
        report_type,
        report_format: ReportFormat::Json,
        status: ReportStatus::Completed,
        title: "Quarterly".to_string(),
        description: Some("Q1 summary".to_string()),
        parameters: None,
        generated_data: Some(data),
        file_url: None,
        file_size_bytes: None,
        generated_by: None,
        date_from: Some(date(2024, 1, 1)),
        date_to: Some(date(2024, 3, 31)),
        created_at: "2024-04-01T08:00:00Z".parse::<Timestamp>().unwrap(),
        completed_at: None,
        expires_at: None,
        download_count: Some(4),
        last_downloaded_at: None,
    }
}

#[test]
fn credit_score_history_maps_source_fields() {
    let data = json!({
        "score_history": [{
            "calculation_date": "2024-01-15",
            "score": 712,
            "payment_history_score": 0.9,
            "credit_utilization_score": 0.3,
            "credit_history_length_score": 0.6,
            "credit_mix_score": 0.5,
            "new_credit_score": 0.7,
            "income_factor": 1.1,
            "status": "good",
            "ignored": "x"
        }]
    });

    let csv = render_csv(ReportType::CreditScoreSummary, &data).unwrap();
    assert_eq!(
        csv,
        "date,score,payment_history,credit_utilization,credit_history_length,credit_mix,new_credit,income_factor,status\n\
         2024-01-15,712,0.9,0.3,0.6,0.5,0.7,1.1,good"
    );
}

#[test]
fn empty_credit_history_is_header_only() {
    let csv = render_csv(ReportType::CreditScoreSummary, &json!({"score_history": []})).unwrap();
    assert!(csv.starts_with("date,score,"));
    assert!(!csv.contains('\n'));

    let missing = render_csv(ReportType::CreditScoreSummary, &Value::Null).unwrap();
    assert_eq!(missing, csv);
}

#[test]
fn financial_columns_follow_first_entry_order() {
    let data = json!({
        "monthly_breakdown": [
            {"month": "2024-01", "income": 5000, "expenses": 3200},
            {"month": "2024-02", "expenses": 2900, "income": 5100, "extra": true}
        ]
    });
    let csv = render_csv(ReportType::FinancialOverview, &data).unwrap();
    assert_eq!(csv, "month,income,expenses\n2024-01,5000,3200\n2024-02,5100,2900");
}

#[test]
fn empty_financial_breakdown_is_empty_output() {
    let csv = render_csv(ReportType::FinancialOverview, &json!({"monthly_breakdown": []})).unwrap();
    assert_eq!(csv, "");
}

#[test]
fn audit_missing_error_message_is_blank() {
    let data = json!({
        "audit_events": [{
            "timestamp": "2024-02-02T10:00:00Z",
            "action": "login",
            "resource_type": "session",
            "resource_id": "s-1",
            "ip_address": "10.0.0.1",
            "success": true
        }, {
            "timestamp": "2024-02-03T10:00:00Z",
            "action": "data_update",
            "resource_type": "profile",
            "resource_id": "p-9",
            "ip_address": "10.0.0.2",
            "success": false,
            "error_message": "Validation failed, field missing"
        }]
    });
    let csv = render_csv(ReportType::AuditTrail, &data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,action,resource_type,resource_id,ip_address,success,error_message");
    assert_eq!(lines[1], "2024-02-02T10:00:00Z,login,session,s-1,10.0.0.1,true,");
    assert_eq!(
        lines[2],
        "2024-02-03T10:00:00Z,data_update,profile,p-9,10.0.0.2,false,\"Validation failed, field missing\""
    );
}

#[test]
fn malformed_payload_degrades_to_raw_json() {
    let data = json!({"score_history": "not a list"});
    assert!(matches!(
        flatten(ReportType::CreditScoreSummary, &data),
        Err(ExportError::UnexpectedShape { .. })
    ));

    let csv = render_csv(ReportType::CreditScoreSummary, &data).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&csv).unwrap(), data);
}

#[test]
fn untabular_types_dump_raw_json() {
    let data = json!({"portfolio": {"loans": 3}});
    assert!(flatten(ReportType::BankPortfolio, &data).unwrap().is_none());
    let out = render_csv(ReportType::BankPortfolio, &data).unwrap();
    assert_eq!(out, serde_json::to_string_pretty(&data).unwrap());
}

#[test]
fn json_export_wraps_payload_with_post_increment_count() {
    let data = json!({"monthly_breakdown": [{"month": "2024-01", "income": 1}]});
    let artifact = export_report(
        &report(ReportType::FinancialOverview, data.clone()),
        ReportFormat::Json,
        date(2024, 5, 6),
    )
    .unwrap();

    assert_eq!(artifact.content_type, "application/json");
    assert_eq!(artifact.filename, "financial_overview_2024-05-06.json");

    let doc: Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(doc["data"], data);
    assert_eq!(doc["report_info"]["id"], "r-1");
    assert_eq!(doc["report_info"]["report_type"], "financial_overview");
    assert_eq!(doc["report_info"]["date_from"], "2024-01-01");
    assert_eq!(doc["report_info"]["download_count"], 5);
    assert_eq!(doc["report_info"]["generated_at"], "2024-04-01T08:00:00Z");
}

#[test]
fn csv_export_is_stable_across_downloads() {
    let mut r = report(
        ReportType::AuditTrail,
        json!({"audit_events": [{"timestamp": "t", "action": "login", "success": true}]}),
    );
    let first = export_report(&r, ReportFormat::Csv, date(2024, 5, 6)).unwrap();
    r.download_count = Some(5);
    let second = export_report(&r, ReportFormat::Csv, date(2024, 5, 6)).unwrap();

    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.content_type, "text/csv");
    assert_eq!(first.filename, "audit_trail_2024-05-06.csv");
}

#[test]
fn pdf_downloads_are_rejected() {
    let r = report(ReportType::AuditTrail, json!({}));
    assert!(matches!(
        export_report(&r, ReportFormat::Pdf, date(2024, 5, 6)),
        Err(ExportError::UnsupportedFormat(ReportFormat::Pdf))
    ));
}

#[test]
fn filename_shape() {
    assert_eq!(
        filename(ReportType::CreditScoreSummary, date(2024, 1, 9), ReportFormat::Csv),
        "credit_score_summary_2024-01-09.csv"
    );
}
