//! Status reclassification from side-channel output.

use crate::event::ResultPayload;
use crate::stats::CounterDelta;
use crate::status::{ReportedStatus, ResultStatus};
use serde::{Deserialize, Serialize};

/// Prefix a task author writes to stdout to flag a result as a warning.
pub const WARNING_PREFIX: &str = "WARNING";

/// Minimum stderr length, in characters, that demotes an OK result.
pub const STDERR_WARNING_MIN_CHARS: usize = 2;

/// Outcome of classifying one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Status to record.
    pub status: ResultStatus,

    /// Adjustment on top of the base count for the reported status.
    pub delta: CounterDelta,
}

impl Classification {
    /// Whether the reported status was overridden.
    pub fn reclassified(&self) -> bool {
        !self.delta.is_zero()
    }
}

/// Reclassification rules.
pub struct ResultClassifier;

impl ResultClassifier {
    /// Decide the final status of a result.
    ///
    /// Rules:
    /// - OK with at least two characters on stderr becomes WARNING
    /// - stdout starting with `WARNING` turns FAILED or OK into WARNING
    ///
    /// Both rules can match the same OK result; it is still moved out of the OK
    /// bucket only once.
    pub fn classify(reported: ReportedStatus, payload: &ResultPayload) -> Classification {
        let reported = ResultStatus::from(reported);
        let mut status = reported;

        if status == ResultStatus::Ok
            && payload.stderr().chars().count() >= STDERR_WARNING_MIN_CHARS
        {
            status = ResultStatus::Warning;
        }

        if payload.stdout().starts_with(WARNING_PREFIX)
            && matches!(status, ResultStatus::Ok | ResultStatus::Failed)
        {
            status = ResultStatus::Warning;
        }

        let delta = if status == reported {
            CounterDelta::default()
        } else {
            CounterDelta::to_warning(reported)
        };

        Classification { status, delta }
    }
}
