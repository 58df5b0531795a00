//! Job-related API endpoints

use async_trait::async_trait;
use vigil_core::domain::job::{JobKind, JobStatusSnapshot};
use vigil_core::dto::job::{JobSummary, SubmitJobRequest, SubmittedJob};

use crate::JobServiceClient;
use crate::api::JobControl;
use crate::error::Result;

impl JobServiceClient {
    /// Submit a new job
    ///
    /// Mutating call: fails fast, never retried.
    ///
    /// # Arguments
    /// * `req` - The job submission request (payload built by the caller)
    ///
    /// # Returns
    /// The name of the submitted job
    pub async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmittedJob> {
        let url = format!("{}/api/{}/jobs", self.base_url, req.kind);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Query the current status of a job
    ///
    /// # Arguments
    /// * `kind` - The job kind (selects the endpoint family)
    /// * `job_name` - The job name
    pub async fn describe_job(&self, kind: JobKind, job_name: &str) -> Result<JobStatusSnapshot> {
        let url = format!("{}/api/{}/jobs/{}", self.base_url, kind, job_name);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Request that a running job be stopped
    pub async fn stop_job(&self, kind: JobKind, job_name: &str) -> Result<()> {
        let url = format!("{}/api/{}/jobs/{}/stop", self.base_url, kind, job_name);
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// List jobs of one kind whose names contain the given fragment
    pub async fn list_jobs(&self, kind: JobKind, name_contains: &str) -> Result<Vec<JobSummary>> {
        let url = format!("{}/api/{}/jobs", self.base_url, kind);
        let response = self
            .client
            .get(&url)
            .query(&[("name_contains", name_contains)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Bind this client to one job kind
    ///
    /// The returned handle implements [`JobControl`] and is what a
    /// `JobPoller` takes ownership of: one concrete implementation per job
    /// kind, supplied by the caller.
    pub fn jobs(&self, kind: JobKind) -> JobKindClient {
        JobKindClient {
            inner: self.clone(),
            kind,
        }
    }
}

/// A [`JobServiceClient`] bound to a single job kind
#[derive(Debug, Clone)]
pub struct JobKindClient {
    inner: JobServiceClient,
    kind: JobKind,
}

impl JobKindClient {
    /// The job kind this handle is bound to
    pub fn kind(&self) -> JobKind {
        self.kind
    }
}

#[async_trait]
impl JobControl for JobKindClient {
    async fn describe_job(&self, job_name: &str) -> Result<JobStatusSnapshot> {
        self.inner.describe_job(self.kind, job_name).await
    }

    async fn stop_job(&self, job_name: &str) -> Result<()> {
        self.inner.stop_job(self.kind, job_name).await
    }

    async fn list_jobs(&self, name_contains: &str) -> Result<Vec<JobSummary>> {
        self.inner.list_jobs(self.kind, name_contains).await
    }
}
