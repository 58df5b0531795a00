//! Job DTOs for the remote job-service API

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobKind, JobStatus};

/// Request to submit a new job
///
/// The payload is built and validated by the caller; Vigil treats it as
/// opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    pub kind: JobKind,
    pub job_name: String,
    pub payload: serde_json::Value,
}

/// Response to a job submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub job_name: String,
}

/// One entry in a job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_name: String,
    pub status: JobStatus,
}
