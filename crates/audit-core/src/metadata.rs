//! Run metadata and identity.

use crate::config::AuditConfig;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Human-readable timestamp format used in reports, e.g. `Mar 07 2026 14:05:09`.
pub const TIME_FORMAT: &str = "%b %d %Y %H:%M:%S";

/// Current time at the precision [`TIME_FORMAT`] keeps, so stamps survive a
/// report round trip.
pub fn report_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Module for serializing chrono DateTime in the report time format
pub mod report_time {
    use super::TIME_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Module for serializing optional chrono DateTime in the report time format
pub mod report_time_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => super::report_time::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::report_time")] DateTime<Utc>);

        let opt = Option::<Wrapper>::deserialize(deserializer)?;
        Ok(opt.map(|Wrapper(d)| d))
    }
}

/// Descriptive data for one audit run.
///
/// Only the task list grows during a run; the end time is set once, at finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Unique identifier of the run.
    pub run_id: Uuid,

    /// What is being audited.
    pub audit_name: String,

    /// Customer whose environment is audited.
    pub customer: String,

    /// When the run was opened.
    #[serde(with = "report_time")]
    pub audit_start_time: DateTime<Utc>,

    /// When the run was finalized (None while open).
    #[serde(with = "report_time_opt")]
    pub audit_end_time: Option<DateTime<Utc>>,

    /// Task names in start order, one entry per task-start notification.
    pub tasks: Vec<String>,
}

impl RunMetadata {
    /// Create metadata for a run starting now.
    pub fn new(audit_name: impl Into<String>, customer: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            audit_name: audit_name.into(),
            customer: customer.into(),
            audit_start_time: report_now(),
            audit_end_time: None,
            tasks: Vec::new(),
        }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.audit_name.clone(), config.customer.clone())
    }

    /// Append a started task's name. Duplicates are kept.
    pub fn record_task(&mut self, name: impl Into<String>) {
        self.tasks.push(name.into());
    }

    pub fn mark_finished(&mut self, at: DateTime<Utc>) {
        self.audit_end_time = Some(at);
    }

    pub fn is_finished(&self) -> bool {
        self.audit_end_time.is_some()
    }
}
