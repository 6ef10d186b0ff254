//! Audit run orchestration.
//!
//! An [`AuditRun`] owns everything one run accumulates: the result store, the
//! statistics and the metadata. Independent runs share nothing, so several can
//! live in one process.

use crate::classifier::ResultClassifier;
use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::event::{PlaybookEvent, ResultPayload};
use crate::metadata::RunMetadata;
use crate::obs;
use crate::report::{AuditReport, ReportFinalizer};
use crate::stats::{AggregateStats, StatsAggregator};
use crate::status::ReportedStatus;
use crate::store::{ClassifiedResult, ResultStore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunPhase {
    /// Accepting notifications.
    Open,
    /// Building the report.
    Finalizing,
    /// Report produced (or finalize failed); read-only.
    Closed,
}

/// One audit run, driven by playbook notifications in arrival order.
#[derive(Debug, Clone)]
pub struct AuditRun {
    phase: RunPhase,
    metadata: RunMetadata,
    store: ResultStore,
    aggregator: StatsAggregator,
    current_play: Option<String>,
    current_task: Option<String>,
}

impl AuditRun {
    /// Open a run starting now.
    pub fn new(audit_name: &str, customer: &str) -> Self {
        Self::with_metadata(RunMetadata::new(audit_name, customer))
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::with_metadata(RunMetadata::from_config(config))
    }

    pub fn with_metadata(metadata: RunMetadata) -> Self {
        obs::emit_run_started(
            &metadata.run_id.to_string(),
            &metadata.audit_name,
            &metadata.customer,
        );
        Self {
            phase: RunPhase::Open,
            metadata,
            store: ResultStore::new(),
            aggregator: StatsAggregator::new(),
            current_play: None,
            current_task: None,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.metadata.run_id
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Running totals. `num_hosts` and `tasks_per_host` are only filled in by finalize.
    pub fn stats(&self) -> &AggregateStats {
        self.aggregator.stats()
    }

    /// A play has started; later outcomes carry its name.
    pub fn play_started(&mut self, name: &str) -> Result<()> {
        self.ensure_open("play_started")?;
        self.current_play = Some(name.to_string());
        Ok(())
    }

    /// A task has started; its name is added to the metadata task list.
    pub fn task_started(&mut self, name: &str) -> Result<()> {
        self.ensure_open("task_started")?;
        self.metadata.record_task(name);
        self.current_task = Some(name.to_string());
        Ok(())
    }

    /// Classify one outcome, count it and store it.
    ///
    /// The reported status is counted first, then the reclassification delta
    /// moves it to WARNING if the payload calls for it.
    pub fn record_outcome(
        &mut self,
        host: &str,
        reported: ReportedStatus,
        payload: &ResultPayload,
    ) -> Result<&ClassifiedResult> {
        self.ensure_open("record_outcome")?;
        if host.is_empty() {
            return Err(AuditError::MalformedEvent(format!(
                "{} outcome without a host identifier",
                reported
            )));
        }

        let classification = ResultClassifier::classify(reported, payload);
        self.aggregator.record_base(reported.into());
        self.aggregator.apply_delta(&classification.delta);
        debug_assert!(self.aggregator.stats().is_consistent());

        let run_id = self.metadata.run_id.to_string();
        if classification.reclassified() {
            obs::emit_result_reclassified(&run_id, host, reported, classification.status);
        }
        obs::emit_result_recorded(&run_id, host, classification.status);

        self.store.append(
            host,
            ClassifiedResult {
                task_name: self.current_task.clone().unwrap_or_default(),
                play_name: self.current_play.clone().unwrap_or_default(),
                result_stdout: payload.stdout().to_string(),
                result_stderr: payload.stderr().to_string(),
                result_status: classification.status,
            },
        );

        self.store.get(host).last().ok_or_else(|| {
            AuditError::MalformedEvent(format!("{} outcome for {} was not stored", reported, host))
        })
    }

    /// Dispatch a wire-level notification.
    pub fn handle(&mut self, event: &PlaybookEvent) -> Result<()> {
        debug!(kind = event.kind(), "handling playbook event");
        match event {
            PlaybookEvent::PlayStarted(e) => self.play_started(&e.name),
            PlaybookEvent::TaskStarted(e) => self.task_started(&e.name),
            _ => {
                if let Some((status, outcome)) = event.outcome() {
                    self.record_outcome(&outcome.host, status, &outcome.payload)?;
                }
                Ok(())
            }
        }
    }

    /// Stream ended: build the report and close the run.
    ///
    /// Must be called exactly once. The run is closed afterwards even when
    /// finalize fails, so a failed finish cannot be retried.
    pub fn finish(&mut self) -> Result<AuditReport> {
        self.ensure_open("finish")?;
        self.phase = RunPhase::Finalizing;

        let run_id = self.metadata.run_id.to_string();
        let _span = obs::RunSpan::enter(&run_id);

        let outcome =
            ReportFinalizer::finalize(&self.store, &mut self.aggregator, &mut self.metadata);
        self.phase = RunPhase::Closed;

        match &outcome {
            Ok(report) => obs::emit_run_finalized(&run_id, &report.stats, &report.host_stats),
            Err(e) => obs::emit_finalize_error(&run_id, e),
        }
        outcome
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.phase == RunPhase::Open {
            Ok(())
        } else {
            Err(AuditError::RunClosed {
                run_id: self.metadata.run_id.to_string(),
                operation: operation.to_string(),
            })
        }
    }
}
