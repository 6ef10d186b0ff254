//! Error types for audit run operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Cannot derive tasks per host: {num_tasks} task(s) across zero hosts")]
    DivisionByZero { num_tasks: u64 },

    #[error("Audit run {run_id} is closed; rejected {operation}")]
    RunClosed { run_id: String, operation: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
