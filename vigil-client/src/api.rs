//! API traits consumed by the monitoring engine
//!
//! The poller is generic over these capability traits so that tests (and
//! alternative transports) can stand in for the HTTP client. Each monitored
//! job gets its own caller-owned handle; there is no shared process-wide
//! client state.

use async_trait::async_trait;
use vigil_core::domain::job::JobStatusSnapshot;
use vigil_core::dto::job::JobSummary;
use vigil_core::dto::log::GetEventsResponse;

use crate::error::Result;

/// Job control operations for one job kind
#[async_trait]
pub trait JobControl: Send + Sync {
    /// Queries the current status of a job
    ///
    /// Read-only and idempotent; safe to retry on throttling.
    async fn describe_job(&self, job_name: &str) -> Result<JobStatusSnapshot>;

    /// Requests that a running job be stopped
    ///
    /// Mutating; never retried by the monitor.
    async fn stop_job(&self, job_name: &str) -> Result<()>;

    /// Lists jobs whose names contain the given fragment
    async fn list_jobs(&self, name_contains: &str) -> Result<Vec<JobSummary>>;
}

/// Log query operations
#[async_trait]
pub trait LogQuery: Send + Sync {
    /// Lists log stream names with the given prefix, in service order
    async fn list_streams(&self, prefix: &str) -> Result<Vec<String>>;

    /// Fetches one page of events from a stream
    ///
    /// `token` is the continuation token from the previous page, or `None`
    /// to read from the start of the stream.
    async fn get_events(&self, stream: &str, token: Option<String>) -> Result<GetEventsResponse>;
}

#[async_trait]
impl<'a, T: JobControl + ?Sized> JobControl for &'a T {
    async fn describe_job(&self, job_name: &str) -> Result<JobStatusSnapshot> {
        (**self).describe_job(job_name).await
    }

    async fn stop_job(&self, job_name: &str) -> Result<()> {
        (**self).stop_job(job_name).await
    }

    async fn list_jobs(&self, name_contains: &str) -> Result<Vec<JobSummary>> {
        (**self).list_jobs(name_contains).await
    }
}

#[async_trait]
impl<'a, T: LogQuery + ?Sized> LogQuery for &'a T {
    async fn list_streams(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list_streams(prefix).await
    }

    async fn get_events(&self, stream: &str, token: Option<String>) -> Result<GetEventsResponse> {
        (**self).get_events(stream, token).await
    }
}

#[async_trait]
impl<T: JobControl + ?Sized> JobControl for std::sync::Arc<T> {
    async fn describe_job(&self, job_name: &str) -> Result<JobStatusSnapshot> {
        (**self).describe_job(job_name).await
    }

    async fn stop_job(&self, job_name: &str) -> Result<()> {
        (**self).stop_job(job_name).await
    }

    async fn list_jobs(&self, name_contains: &str) -> Result<Vec<JobSummary>> {
        (**self).list_jobs(name_contains).await
    }
}

#[async_trait]
impl<T: LogQuery + ?Sized> LogQuery for std::sync::Arc<T> {
    async fn list_streams(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list_streams(prefix).await
    }

    async fn get_events(&self, stream: &str, token: Option<String>) -> Result<GetEventsResponse> {
        (**self).get_events(stream, token).await
    }
}
