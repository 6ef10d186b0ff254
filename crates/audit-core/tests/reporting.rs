use audit_core::{
    read_report_json, render_summary_md, write_report_json, write_summary_md, AuditConfig,
    AuditReport, AuditRun, ReportedStatus, ResultPayload,
};
use serde_json::Value;

fn finished_report(config: &AuditConfig) -> AuditReport {
    let mut run = AuditRun::from_config(config);
    run.play_started("baseline").expect("play start");
    run.task_started("check sshd").expect("task start");
    run.record_outcome("web02", ReportedStatus::Ok, &ResultPayload::new())
        .expect("record");
    run.record_outcome(
        "web01",
        ReportedStatus::Failed,
        &ResultPayload::new().with_stderr("sshd: not found"),
    )
    .expect("record");
    run.record_outcome("db01", ReportedStatus::Unreachable, &ResultPayload::new())
        .expect("record");
    run.finish().expect("finish")
}

#[test]
fn json_report_roundtrips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AuditConfig::new("Web tier", "ACME").with_working_dir(dir.path().join("audits"));
    let report = finished_report(&config);

    let path = config.json_path(&report.meta.run_id);
    write_report_json(&path, &report).expect("write report");
    assert!(path.exists());

    let loaded = read_report_json(&path).expect("read report");
    assert_eq!(loaded, report);
}

#[test]
fn json_report_preserves_field_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AuditConfig::new("Web tier", "ACME").with_working_dir(dir.path());
    let report = finished_report(&config);

    let path = config.json_path(&report.meta.run_id);
    write_report_json(&path, &report).expect("write report");
    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");

    for key in [
        "num_hosts",
        "num_tasks",
        "hosts_failed",
        "tasks_failed",
        "tasks_warning",
        "tasks_skipped",
        "tasks_ok",
        "tasks_per_host",
    ] {
        assert!(raw["stats"].get(key).is_some(), "missing stats key: {}", key);
    }
    for key in ["OK", "FAILED", "WARNING", "SKIPPED", "UNREACHABLE"] {
        assert!(
            raw["host_stats"]["web01"].get(key).is_some(),
            "missing host_stats key: {}",
            key
        );
    }
    for key in ["audit_name", "customer", "audit_start_time", "audit_end_time", "tasks"] {
        assert!(raw["meta"].get(key).is_some(), "missing meta key: {}", key);
    }
    let first = &raw["results"]["web01"][0];
    assert_eq!(first["result_status"], "FAILED");
    assert_eq!(first["result_stderr"], "sshd: not found");
    assert_eq!(first["result_stdout"], "");
    assert_eq!(first["task_name"], "check sshd");
    assert_eq!(first["play_name"], "baseline");
}

#[test]
fn markdown_summary_lists_hosts_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AuditConfig::new("Web tier", "ACME").with_working_dir(dir.path());
    let report = finished_report(&config);

    let md = render_summary_md(&report);
    let db = md.find("| db01 |").expect("db01 row");
    let web1 = md.find("| web01 |").expect("web01 row");
    let web2 = md.find("| web02 |").expect("web02 row");
    assert!(db < web1 && web1 < web2);
    assert!(md.contains("| web01 | 0 | 1 | 0 | 0 | 0 | danger |"));
    assert!(md.contains("- `db01` check sshd: UNREACHABLE"));

    let path = config.summary_path(&report.meta.run_id);
    write_summary_md(&path, &report).expect("write summary");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), md);
}
