use scorly_audit::events::AuditEvent;

#[test]
fn download_event_carries_format() {
    let event = AuditEvent::report_downloaded("r-1", "u-1", "csv");
    assert_eq!(event.action, "report_downloaded");
    assert_eq!(event.resource_id, "r-1");
    assert!(event.success);
    assert_eq!(event.details.unwrap()["format"], "csv");
}

#[test]
fn failed_marks_event() {
    let event = AuditEvent::report_downloaded("r-1", "u-1", "json").failed();
    assert!(!event.success);
    assert_eq!(event.action, "report_downloaded");
}

#[test]
fn generation_failure_names_the_requested_type() {
    let event = AuditEvent::report_generation_failed("u-1", "audit_trail", "procedure failed");
    assert_eq!(event.action, "report_generation_failed");
    assert_eq!(event.resource_id, "audit_trail");
    assert!(!event.success);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["user_id"], "u-1");
    assert_eq!(json["details"]["report_type"], "audit_trail");
    assert_eq!(json["details"]["error"], "procedure failed");
}
