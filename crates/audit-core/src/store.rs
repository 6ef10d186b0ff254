//! Per-host result log.

use crate::status::ResultStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One task outcome on one host, after reclassification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedResult {
    pub task_name: String,
    pub play_name: String,
    pub result_stdout: String,
    pub result_stderr: String,
    pub result_status: ResultStatus,
}

/// Append-only log of classified results, keyed by host.
///
/// Each host's results keep arrival order. Hosts iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    results: BTreeMap<String, Vec<ClassifiedResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result to the end of the host's sequence.
    pub fn append(&mut self, host: &str, result: ClassifiedResult) {
        self.results.entry(host.to_string()).or_default().push(result);
    }

    /// Results for a host in arrival order; empty if the host was never seen.
    pub fn get(&self, host: &str) -> &[ClassifiedResult] {
        self.results.get(host).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every host seen so far, sorted.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    pub fn host_count(&self) -> usize {
        self.results.len()
    }

    /// Total number of stored results across all hosts.
    pub fn len(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<ClassifiedResult>> {
        self.results
    }
}
