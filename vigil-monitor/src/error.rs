//! Error types for the monitoring engine

use thiserror::Error;
use vigil_client::ClientError;

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors surfaced by the monitoring engine
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The job reached a terminal failure status
    #[error("job {job_name} failed: {reason}")]
    JobFailed {
        /// Name of the failed job
        job_name: String,
        /// Failure reason reported by the service
        reason: String,
    },

    /// A remote call failed (after any retry budget was spent)
    #[error(transparent)]
    Client(#[from] ClientError),
}
