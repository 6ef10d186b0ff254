//! Inbound playbook notifications
//!
//! The orchestration engine reports play starts, task starts and one outcome per
//! host per task. Outcome payloads are free-form on the wire; they are narrowed
//! to [`ResultPayload`] here, once, so classification never reads raw maps.

use crate::error::{AuditError, Result};
use crate::status::ReportedStatus;
use serde::{Deserialize, Serialize};

/// Side-channel output attached to a task outcome.
///
/// Only `stdout` and `stderr` are inspected; any other payload keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}

impl ResultPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    /// Narrow an engine result map to the fields the classifier reads.
    ///
    /// Non-object values (the engine sends nothing useful for skips) yield an
    /// empty payload. A present `stdout`/`stderr` that is not a string is rejected.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| AuditError::MalformedEvent(format!("invalid result payload: {}", e)))
    }

    /// stdout, or the empty string when absent.
    pub fn stdout(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    /// stderr, or the empty string when absent.
    pub fn stderr(&self) -> &str {
        self.stderr.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// EVENT TYPES
// ============================================================================

/// Playbook notifications, in the order the engine emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PlaybookEvent {
    /// A play has started; later outcomes are attributed to it
    PlayStarted(PlayStartedEvent),

    /// A task has started; its name is appended to the run's task list
    TaskStarted(TaskStartedEvent),

    /// A task succeeded on a host
    RunnerOk(HostOutcome),

    /// A task failed on a host
    RunnerFailed(HostOutcome),

    /// A task was skipped on a host
    RunnerSkipped(HostOutcome),

    /// A host could not be reached
    RunnerUnreachable(HostOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStartedEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStartedEvent {
    pub name: String,
}

/// Outcome of the current task on one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOutcome {
    /// Missing hosts deserialize as empty and are rejected by the run.
    #[serde(default)]
    pub host: String,
    #[serde(default, deserialize_with = "payload_from_wire")]
    pub payload: ResultPayload,
}

fn payload_from_wire<'de, D>(deserializer: D) -> std::result::Result<ResultPayload, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    ResultPayload::from_value(&raw).map_err(serde::de::Error::custom)
}

impl HostOutcome {
    pub fn new(host: impl Into<String>, payload: ResultPayload) -> Self {
        Self {
            host: host.into(),
            payload,
        }
    }
}

impl PlaybookEvent {
    /// Event type name, as used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            PlaybookEvent::PlayStarted(_) => "play_started",
            PlaybookEvent::TaskStarted(_) => "task_started",
            PlaybookEvent::RunnerOk(_) => "runner_ok",
            PlaybookEvent::RunnerFailed(_) => "runner_failed",
            PlaybookEvent::RunnerSkipped(_) => "runner_skipped",
            PlaybookEvent::RunnerUnreachable(_) => "runner_unreachable",
        }
    }

    /// The reported status and host outcome, for outcome notifications.
    pub fn outcome(&self) -> Option<(ReportedStatus, &HostOutcome)> {
        match self {
            PlaybookEvent::RunnerOk(o) => Some((ReportedStatus::Ok, o)),
            PlaybookEvent::RunnerFailed(o) => Some((ReportedStatus::Failed, o)),
            PlaybookEvent::RunnerSkipped(o) => Some((ReportedStatus::Skipped, o)),
            PlaybookEvent::RunnerUnreachable(o) => Some((ReportedStatus::Unreachable, o)),
            PlaybookEvent::PlayStarted(_) | PlaybookEvent::TaskStarted(_) => None,
        }
    }
}
