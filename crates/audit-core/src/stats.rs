//! Aggregate and per-host statistics.
//!
//! [`StatsAggregator`] keeps the running totals for a run. Base counts are
//! recorded per reported status, then any reclassification delta is applied on
//! top. Host stats are never updated incrementally: they are rebuilt from the
//! [`ResultStore`] so they always agree with what was stored.

use crate::error::{AuditError, Result};
use crate::status::ResultStatus;
use crate::store::ResultStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub num_hosts: u64,
    pub num_tasks: u64,
    /// Number of UNREACHABLE results.
    pub hosts_failed: u64,
    pub tasks_failed: u64,
    pub tasks_warning: u64,
    pub tasks_skipped: u64,
    pub tasks_ok: u64,
    /// Derived at finalize; zero until then.
    pub tasks_per_host: u64,
}

impl AggregateStats {
    /// Whether the task buckets add up to `num_tasks`.
    pub fn is_consistent(&self) -> bool {
        self.tasks_ok + self.tasks_failed + self.tasks_warning + self.tasks_skipped
            == self.num_tasks
    }
}

/// Counter adjustment produced by reclassification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDelta {
    pub tasks_ok: i64,
    pub tasks_failed: i64,
    pub tasks_warning: i64,
}

impl CounterDelta {
    /// Move one task from the `from` bucket into WARNING.
    pub fn to_warning(from: ResultStatus) -> Self {
        let mut delta = Self {
            tasks_warning: 1,
            ..Self::default()
        };
        match from {
            ResultStatus::Ok => delta.tasks_ok = -1,
            ResultStatus::Failed => delta.tasks_failed = -1,
            _ => return Self::default(),
        }
        delta
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// How a host's row should be highlighted by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostHealth {
    Success,
    Warning,
    Danger,
}

impl HostHealth {
    pub fn name(&self) -> &'static str {
        match self {
            HostHealth::Success => "success",
            HostHealth::Warning => "warning",
            HostHealth::Danger => "danger",
        }
    }
}

/// Per-host result counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStats {
    #[serde(rename = "OK")]
    pub ok: u64,
    #[serde(rename = "FAILED")]
    pub failed: u64,
    #[serde(rename = "WARNING")]
    pub warning: u64,
    #[serde(rename = "SKIPPED")]
    pub skipped: u64,
    #[serde(rename = "UNREACHABLE")]
    pub unreachable: u64,
}

impl HostStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one result.
    pub fn record(&mut self, status: ResultStatus) {
        match status {
            ResultStatus::Ok => self.ok += 1,
            ResultStatus::Failed => self.failed += 1,
            ResultStatus::Warning => self.warning += 1,
            ResultStatus::Skipped => self.skipped += 1,
            ResultStatus::Unreachable => self.unreachable += 1,
        }
    }

    pub fn count(&self, status: ResultStatus) -> u64 {
        match status {
            ResultStatus::Ok => self.ok,
            ResultStatus::Failed => self.failed,
            ResultStatus::Warning => self.warning,
            ResultStatus::Skipped => self.skipped,
            ResultStatus::Unreachable => self.unreachable,
        }
    }

    /// Total number of results for the host.
    pub fn total(&self) -> u64 {
        self.ok + self.failed + self.warning + self.skipped + self.unreachable
    }

    /// Results that count as tasks (everything except UNREACHABLE).
    pub fn tasks(&self) -> u64 {
        self.total() - self.unreachable
    }

    pub fn health(&self) -> HostHealth {
        if self.failed > 0 || self.unreachable > 0 {
            HostHealth::Danger
        } else if self.warning > 0 {
            HostHealth::Warning
        } else {
            HostHealth::Success
        }
    }
}

/// Running statistics for one audit run.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    stats: AggregateStats,
    host_stats: BTreeMap<String, HostStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a result under its reported status.
    ///
    /// UNREACHABLE only bumps `hosts_failed` and leaves `num_tasks` alone; see
    /// [`ResultStatus::counts_as_task`].
    pub fn record_base(&mut self, status: ResultStatus) {
        match status {
            ResultStatus::Ok => self.stats.tasks_ok += 1,
            ResultStatus::Failed => self.stats.tasks_failed += 1,
            ResultStatus::Warning => self.stats.tasks_warning += 1,
            ResultStatus::Skipped => self.stats.tasks_skipped += 1,
            ResultStatus::Unreachable => self.stats.hosts_failed += 1,
        }
        if status.counts_as_task() {
            self.stats.num_tasks += 1;
        }
    }

    /// Apply a reclassification delta to the running totals.
    pub fn apply_delta(&mut self, delta: &CounterDelta) {
        let s = &mut self.stats;
        s.tasks_ok = s.tasks_ok.saturating_add_signed(delta.tasks_ok);
        s.tasks_failed = s.tasks_failed.saturating_add_signed(delta.tasks_failed);
        s.tasks_warning = s.tasks_warning.saturating_add_signed(delta.tasks_warning);
    }

    /// Rebuild every host's counts from the stored results.
    pub fn recompute_host_stats(&mut self, store: &ResultStore) {
        self.host_stats = store
            .hosts()
            .map(|host| {
                let mut counts = HostStats::new();
                for result in store.get(host) {
                    counts.record(result.result_status);
                }
                (host.to_string(), counts)
            })
            .collect();
    }

    /// Compute the derived metrics and return the final aggregate.
    ///
    /// Call after [`recompute_host_stats`](Self::recompute_host_stats).
    /// `tasks_per_host` divides by the hosts that ran at least one task. It is
    /// zero when every host was unreachable. A run with no hosts is an error.
    pub fn finalize(&mut self) -> Result<AggregateStats> {
        self.stats.num_hosts = self.host_stats.len() as u64;
        if self.stats.num_hosts == 0 {
            return Err(AuditError::DivisionByZero {
                num_tasks: self.stats.num_tasks,
            });
        }

        let task_hosts = self.host_stats.values().filter(|h| h.tasks() > 0).count() as u64;
        self.stats.tasks_per_host = match task_hosts {
            0 => 0,
            n => self.stats.num_tasks / n,
        };

        Ok(self.stats.clone())
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn host_stats(&self) -> &BTreeMap<String, HostStats> {
        &self.host_stats
    }
}
