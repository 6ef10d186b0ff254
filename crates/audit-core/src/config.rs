//! Audit configuration
//!
//! Values come from the environment unless set explicitly:
//! `AUDIT_NAME`, `CUSTOMER` and `AUDIT_WORKING_DIR`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_AUDIT_NAME: &str = "No audit name specified";
pub const DEFAULT_CUSTOMER: &str = "No customer specified";
pub const DEFAULT_WORKING_DIR: &str = "/var/log/ansible/audits/";
pub const DEFAULT_FILENAME_PREFIX: &str = "audit";

/// Audit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Name of the audit being carried out
    pub audit_name: String,
    /// Customer name, when auditing a customer environment
    pub customer: String,
    /// Directory report artifacts are written to
    pub working_dir: PathBuf,
    /// Prefix for artifact file names
    pub filename_prefix: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            audit_name: std::env::var("AUDIT_NAME")
                .unwrap_or_else(|_| DEFAULT_AUDIT_NAME.to_string()),
            customer: std::env::var("CUSTOMER").unwrap_or_else(|_| DEFAULT_CUSTOMER.to_string()),
            working_dir: std::env::var("AUDIT_WORKING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORKING_DIR)),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }
}

impl AuditConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a named audit, ignoring the environment
    pub fn new(audit_name: &str, customer: &str) -> Self {
        AuditConfig {
            audit_name: audit_name.to_string(),
            customer: customer.to_string(),
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }

    /// Set the artifact directory
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the artifact file name prefix
    pub fn with_filename_prefix(mut self, prefix: &str) -> Self {
        self.filename_prefix = prefix.to_string();
        self
    }

    /// Path of the JSON report for a run
    pub fn json_path(&self, run_id: &Uuid) -> PathBuf {
        self.working_dir
            .join(format!("{}-{}.json", self.filename_prefix, run_id))
    }

    /// Path of the Markdown summary for a run
    pub fn summary_path(&self, run_id: &Uuid) -> PathBuf {
        self.working_dir
            .join(format!("{}-{}.md", self.filename_prefix, run_id))
    }
}
