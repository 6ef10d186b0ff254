//! Playbook Audit CLI
//!
//! The `playbook-audit` command replays recorded playbook events and writes an
//! audit report.
//!
//! ## Commands
//!
//! - `replay`: Drive an audit run from a JSON-lines event log
//! - `summarize`: Print the Markdown summary of a saved report

use anyhow::{Context, Result};
use audit_core::{
    obs::RunSpan, read_report_json, render_summary_md, write_report_json, write_summary_md,
    AuditConfig, AuditReport, AuditRun, PlaybookEvent,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "playbook-audit")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Audit reports from playbook task outcomes", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines event log and write the audit report
    Replay {
        /// Event log, one playbook event per line
        #[arg(short, long)]
        events: PathBuf,

        /// Name of the audit (default: $AUDIT_NAME)
        #[arg(long, env = "AUDIT_NAME")]
        audit_name: Option<String>,

        /// Customer being audited (default: $CUSTOMER)
        #[arg(long, env = "CUSTOMER")]
        customer: Option<String>,

        /// Directory for report artifacts (default: $AUDIT_WORKING_DIR)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Also write a Markdown summary next to the JSON report
        #[arg(long)]
        summary: bool,
    },

    /// Print the Markdown summary of a saved JSON report
    Summarize {
        /// Path to the JSON report
        report: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    audit_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Replay {
            events,
            audit_name,
            customer,
            out_dir,
            summary,
        } => {
            let mut config = AuditConfig::from_env();
            if let Some(name) = audit_name {
                config.audit_name = name;
            }
            if let Some(customer) = customer {
                config.customer = customer;
            }
            if let Some(dir) = out_dir {
                config = config.with_working_dir(dir);
            }
            cmd_replay(&config, &events, summary).await
        }
        Commands::Summarize { report } => cmd_summarize(&report),
    }
}

/// Parse a JSON-lines event log. Blank lines are skipped.
fn parse_event_log(content: &str) -> Result<Vec<PlaybookEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<PlaybookEvent>(line).with_context(|| format!("Invalid event on line {}", i + 1))
        })
        .collect()
}

/// Drive a run from the event log and close it.
fn replay_events(config: &AuditConfig, events: &[PlaybookEvent]) -> Result<AuditReport> {
    let mut run = AuditRun::from_config(config);
    let run_id = run.run_id().to_string();
    let _span = RunSpan::enter(&run_id);

    for (i, event) in events.iter().enumerate() {
        run.handle(event)
            .with_context(|| format!("Failed to record event {} ({})", i + 1, event.kind()))?;
    }

    run.finish().context("Failed to finalize audit run")
}

async fn cmd_replay(config: &AuditConfig, events_path: &Path, summary: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(events_path)
        .await
        .with_context(|| format!("Failed to read event log {:?}", events_path))?;
    let events = parse_event_log(&content)?;
    info!(count = events.len(), "Replaying playbook events");

    let report = replay_events(config, &events)?;

    let json_path = config.json_path(&report.meta.run_id);
    write_report_json(&json_path, &report)?;
    info!(path = ?json_path, "Wrote JSON report");

    if summary {
        let md_path = config.summary_path(&report.meta.run_id);
        write_summary_md(&md_path, &report)?;
        info!(path = ?md_path, "Wrote Markdown summary");
    }

    let stats = &report.stats;
    println!("Audit: {} ({})", report.meta.audit_name, report.meta.customer);
    println!("Run ID: {}", report.meta.run_id);
    println!(
        "Status: {}",
        if report.is_clean() { "✓ CLEAN" } else { "✗ FINDINGS" }
    );
    println!();
    println!("  Hosts:             {}", stats.num_hosts);
    println!("  Tasks:             {}", stats.num_tasks);
    println!("  OK:                {}", stats.tasks_ok);
    println!("  Warning:           {}", stats.tasks_warning);
    println!("  Failed:            {}", stats.tasks_failed);
    println!("  Skipped:           {}", stats.tasks_skipped);
    println!("  Unreachable hosts: {}", stats.hosts_failed);
    println!("  Tasks per host:    {}", stats.tasks_per_host);
    println!();
    println!("Report: {}", json_path.display());

    Ok(())
}

fn cmd_summarize(path: &Path) -> Result<()> {
    let report = read_report_json(path)?;
    print!("{}", render_summary_md(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::AuditError;

    const LOG: &str = r#"
{"type":"play_started","data":{"name":"baseline"}}
{"type":"task_started","data":{"name":"check sshd"}}
{"type":"runner_ok","data":{"host":"host-a"}}

{"type":"runner_failed","data":{"host":"host-b","payload":{"stdout":"WARNING failed gracefully"}}}
{"type":"runner_unreachable","data":{"host":"host-c","payload":{"msg":"timeout"}}}
"#;

    #[test]
    fn test_parse_event_log_skips_blank_lines() {
        let events = parse_event_log(LOG).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].kind(), "play_started");
        assert_eq!(events[4].kind(), "runner_unreachable");
    }

    #[test]
    fn test_parse_event_log_reports_line_number() {
        let err = parse_event_log("{\"type\":\"task_started\",\"data\":{\"name\":\"x\"}}\nnot json")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_replay_events_builds_report() {
        let config = AuditConfig::new("Web tier", "ACME");
        let events = parse_event_log(LOG).unwrap();

        let report = replay_events(&config, &events).unwrap();
        assert_eq!(report.stats.num_hosts, 3);
        assert_eq!(report.stats.num_tasks, 2);
        assert_eq!(report.stats.tasks_warning, 1);
        assert_eq!(report.stats.hosts_failed, 1);
        assert_eq!(report.stats.tasks_per_host, 1);
        assert_eq!(report.meta.audit_name, "Web tier");
    }

    #[test]
    fn test_replay_empty_log_fails() {
        let config = AuditConfig::new("a", "c");
        let err = replay_events(&config, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::DivisionByZero { .. })
        ));
    }

    #[tokio::test]
    async fn test_replay_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("events.jsonl");
        tokio::fs::write(&log_path, LOG).await.unwrap();

        let config = AuditConfig::new("a", "c").with_working_dir(dir.path().join("out"));
        cmd_replay(&config, &log_path, true).await.unwrap();

        let mut json = 0;
        let mut md = 0;
        for entry in std::fs::read_dir(dir.path().join("out")).unwrap() {
            match entry.unwrap().path().extension().and_then(|e| e.to_str()) {
                Some("json") => json += 1,
                Some("md") => md += 1,
                _ => {}
            }
        }
        assert_eq!((json, md), (1, 1));
    }

    #[test]
    fn test_summarize_reads_saved_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuditConfig::new("a", "c").with_working_dir(dir.path());
        let report = replay_events(&config, &parse_event_log(LOG).unwrap()).unwrap();
        let path = config.json_path(&report.meta.run_id);
        write_report_json(&path, &report).unwrap();

        cmd_summarize(&path).unwrap();
    }

    #[test]
    fn test_summarize_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_summarize(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
