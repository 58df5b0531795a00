//! Job domain types

use serde::{Deserialize, Serialize};

/// Kind of remote job being monitored
///
/// Training, tuning and transform jobs share the same describe/wait shape on
/// the remote service; the kind only selects the endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Training,
    Tuning,
    Transform,
}

impl JobKind {
    /// URL path segment for this job kind
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Training => "training",
            JobKind::Tuning => "tuning",
            JobKind::Transform => "transform",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    InProgress,
    Stopping,
    Completed,
    Failed,
    Stopped,
}

impl JobStatus {
    /// Whether the job has reached a terminal state
    ///
    /// `Stopping` is not terminal: the service still transitions it to
    /// `Stopped` (or `Failed`) before the job is done.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Stopped)
    }

    /// Whether the job ended in failure
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Failed)
    }
}

/// One entry in a job's secondary-status transition history
///
/// The service reports a finer-grained, human-readable status within a
/// coarse status (e.g. "Downloading", "Training"), each with its own
/// message and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub status: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Immutable record of one status query
///
/// Produced by `describe_job`; never mutated. Each poll yields a fresh
/// snapshot, and the previous one is retained only for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusSnapshot {
    pub job_name: String,
    pub status: JobStatus,
    /// Failure reason text reported by the service, present on `Failed` jobs
    pub failure_reason: Option<String>,
    pub secondary_transitions: Vec<StatusTransition>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
