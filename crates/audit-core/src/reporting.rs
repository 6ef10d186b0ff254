//! Report artifacts.
//!
//! - `audit-<run_id>.json`: the full report, keys sorted
//! - `audit-<run_id>.md`: human-readable summary with a per-host table

use crate::metadata::TIME_FORMAT;
use crate::report::AuditReport;
use crate::status::ResultStatus;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialize the report as pretty JSON with object keys in sorted order.
pub fn report_to_json(report: &AuditReport) -> Result<String> {
    // serde_json::Map is ordered by key, so going through Value sorts every level
    let value = serde_json::to_value(report).context("serialize audit report")?;
    serde_json::to_string_pretty(&value).context("render audit report JSON")
}

/// Write the JSON report, creating the parent directory if needed.
pub fn write_report_json(path: &Path, report: &AuditReport) -> Result<()> {
    let content = report_to_json(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
    }
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Load a JSON report written by [`write_report_json`].
pub fn read_report_json(path: &Path) -> Result<AuditReport> {
    let content = std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parse audit report {:?}", path))
}

/// Render the Markdown summary.
pub fn render_summary_md(report: &AuditReport) -> String {
    let meta = &report.meta;
    let stats = &report.stats;

    let mut out = format!("# Audit Report: {}\n\n", meta.audit_name);
    out.push_str(&format!("- Customer: {}\n", meta.customer));
    out.push_str(&format!("- Run: {}\n", meta.run_id));
    out.push_str(&format!(
        "- Started: {}\n",
        meta.audit_start_time.format(TIME_FORMAT)
    ));
    match meta.audit_end_time {
        Some(end) => out.push_str(&format!("- Finished: {}\n", end.format(TIME_FORMAT))),
        None => out.push_str("- Finished: in progress\n"),
    }
    out.push_str(&format!("- Tasks started: {}\n", meta.tasks.len()));

    out.push_str("\n## Summary\n\n| Metric | Value |\n|---|---|\n");
    for (label, value) in [
        ("Hosts", stats.num_hosts),
        ("Tasks", stats.num_tasks),
        ("OK", stats.tasks_ok),
        ("Warning", stats.tasks_warning),
        ("Failed", stats.tasks_failed),
        ("Skipped", stats.tasks_skipped),
        ("Unreachable hosts", stats.hosts_failed),
        ("Tasks per host", stats.tasks_per_host),
    ] {
        out.push_str(&format!("| {} | {} |\n", label, value));
    }

    out.push_str("\n## Hosts\n\n| Host |");
    for status in ResultStatus::ALL {
        out.push_str(&format!(" {} |", status));
    }
    out.push_str(" Health |\n|---|");
    for _ in ResultStatus::ALL {
        out.push_str("---|");
    }
    out.push_str("---|\n");
    for (host, counts) in &report.host_stats {
        out.push_str(&format!("| {} |", host));
        for status in ResultStatus::ALL {
            out.push_str(&format!(" {} |", counts.count(status)));
        }
        out.push_str(&format!(" {} |\n", counts.health().name()));
    }

    let findings: Vec<String> = report
        .results
        .iter()
        .flat_map(|(host, results)| {
            results
                .iter()
                .filter(|r| {
                    !matches!(r.result_status, ResultStatus::Ok | ResultStatus::Skipped)
                })
                .map(move |r| format!("- `{}` {}: {}\n", host, r.task_name, r.result_status))
        })
        .collect();
    if !findings.is_empty() {
        out.push_str("\n## Findings\n\n");
        for line in findings {
            out.push_str(&line);
        }
    }

    out
}

/// Write the Markdown summary.
pub fn write_summary_md(path: &Path, report: &AuditReport) -> Result<()> {
    let md = render_summary_md(report);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}
