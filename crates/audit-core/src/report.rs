//! Final audit report assembly.

use crate::error::Result;
use crate::metadata::{report_now, RunMetadata};
use crate::stats::{AggregateStats, HostHealth, HostStats, StatsAggregator};
use crate::store::{ClassifiedResult, ResultStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable result of a finished audit run.
///
/// This is the hand-off to exporters. Per-host maps are keyed and ordered by host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub results: BTreeMap<String, Vec<ClassifiedResult>>,
    pub stats: AggregateStats,
    pub host_stats: BTreeMap<String, HostStats>,
    pub meta: RunMetadata,
}

impl AuditReport {
    /// Hosts in report order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.host_stats.keys().map(String::as_str)
    }

    /// Health of each host, in report order.
    pub fn host_health(&self) -> Vec<(&str, HostHealth)> {
        self.host_stats
            .iter()
            .map(|(host, stats)| (host.as_str(), stats.health()))
            .collect()
    }

    /// Whether every task ended OK or SKIPPED and every host was reachable.
    pub fn is_clean(&self) -> bool {
        self.stats.tasks_failed == 0 && self.stats.tasks_warning == 0 && self.stats.hosts_failed == 0
    }
}

/// Builds the report at stream end.
pub struct ReportFinalizer;

impl ReportFinalizer {
    /// Close out the run data and assemble the report.
    ///
    /// Stamps the end time, rebuilds host stats once, then derives the final
    /// aggregate. Fails if no host was seen.
    pub fn finalize(
        store: &ResultStore,
        aggregator: &mut StatsAggregator,
        metadata: &mut RunMetadata,
    ) -> Result<AuditReport> {
        metadata.mark_finished(report_now());
        aggregator.recompute_host_stats(store);
        let stats = aggregator.finalize()?;

        Ok(AuditReport {
            results: store.clone().into_inner(),
            stats,
            host_stats: aggregator.host_stats().clone(),
            meta: metadata.clone(),
        })
    }
}
