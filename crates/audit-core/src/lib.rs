//! Playbook Audit Core
//!
//! Turns the per-host task outcomes of a playbook run into an audit report:
//! - Reclassifies reported statuses from stdout/stderr content
//! - Keeps aggregate and per-host counters in step with the reclassified results
//! - Finalizes an immutable report for JSON and Markdown export

pub mod classifier;
pub mod config;
pub mod error;
pub mod event;
pub mod metadata;
pub mod obs;
pub mod report;
pub mod reporting;
pub mod run;
pub mod stats;
pub mod status;
pub mod store;
pub mod telemetry;

// Re-export key types
pub use classifier::{Classification, ResultClassifier};
pub use config::AuditConfig;
pub use error::{AuditError, Result};
pub use event::{HostOutcome, PlayStartedEvent, PlaybookEvent, ResultPayload, TaskStartedEvent};
pub use metadata::RunMetadata;
pub use report::{AuditReport, ReportFinalizer};
pub use reporting::{
    read_report_json, render_summary_md, report_to_json, write_report_json, write_summary_md,
};
pub use run::{AuditRun, RunPhase};
pub use stats::{AggregateStats, CounterDelta, HostHealth, HostStats, StatsAggregator};
pub use status::{ReportedStatus, ResultStatus};
pub use store::{ClassifiedResult, ResultStore};
pub use telemetry::init_tracing;

/// Audit core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
