//! Task outcome statuses.

use serde::{Deserialize, Serialize};

/// Status reported by the orchestration engine for a task on one host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportedStatus {
    Ok,
    Failed,
    Skipped,
    Unreachable,
}

/// Final status of a recorded result.
///
/// `Warning` never arrives from the engine; it only comes out of reclassification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultStatus {
    Ok,
    Failed,
    Skipped,
    Unreachable,
    Warning,
}

impl ResultStatus {
    /// All statuses, in the column order used by host tables.
    pub const ALL: [ResultStatus; 5] = [
        ResultStatus::Ok,
        ResultStatus::Failed,
        ResultStatus::Warning,
        ResultStatus::Skipped,
        ResultStatus::Unreachable,
    ];

    /// Get the status label as it appears in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ResultStatus::Ok => "OK",
            ResultStatus::Failed => "FAILED",
            ResultStatus::Skipped => "SKIPPED",
            ResultStatus::Unreachable => "UNREACHABLE",
            ResultStatus::Warning => "WARNING",
        }
    }

    /// Whether a result with this status is counted in `num_tasks`.
    ///
    /// UNREACHABLE is intentionally excluded: an unreachable host never ran the
    /// task, so it is accounted as a failed host (`hosts_failed`) instead. The
    /// result itself is still stored and still shows up in host stats.
    pub fn counts_as_task(&self) -> bool {
        !matches!(self, ResultStatus::Unreachable)
    }
}

impl From<ReportedStatus> for ResultStatus {
    fn from(status: ReportedStatus) -> Self {
        match status {
            ReportedStatus::Ok => ResultStatus::Ok,
            ReportedStatus::Failed => ResultStatus::Failed,
            ReportedStatus::Skipped => ResultStatus::Skipped,
            ReportedStatus::Unreachable => ResultStatus::Unreachable,
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for ReportedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ResultStatus::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(ResultStatus::Ok.name(), "OK");
        assert_eq!(ResultStatus::Failed.name(), "FAILED");
        assert_eq!(ResultStatus::Skipped.name(), "SKIPPED");
        assert_eq!(ResultStatus::Unreachable.name(), "UNREACHABLE");
        assert_eq!(ResultStatus::Warning.name(), "WARNING");
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ResultStatus::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");

        let parsed: ReportedStatus = serde_json::from_str("\"UNREACHABLE\"").unwrap();
        assert_eq!(parsed, ReportedStatus::Unreachable);
    }

    #[test]
    fn test_unreachable_is_not_a_task() {
        assert!(!ResultStatus::Unreachable.counts_as_task());
        assert!(ResultStatus::Ok.counts_as_task());
        assert!(ResultStatus::Failed.counts_as_task());
        assert!(ResultStatus::Skipped.counts_as_task());
        assert!(ResultStatus::Warning.counts_as_task());
    }

    #[test]
    fn test_reported_status_conversion() {
        assert_eq!(ResultStatus::from(ReportedStatus::Ok), ResultStatus::Ok);
        assert_eq!(
            ResultStatus::from(ReportedStatus::Unreachable),
            ResultStatus::Unreachable
        );
        assert_eq!(ReportedStatus::Failed.to_string(), "FAILED");
    }
}
