//! Job-name bookkeeping
//!
//! Callers submitting jobs derive unique names by counting how many jobs
//! already carry the base name. The list query is read-only and gets
//! throttled under load, so it goes through the retry policy.

use vigil_client::{ClientError, JobControl};

use crate::retry::RetryPolicy;

/// Counts existing jobs whose name matches `job_name` exactly
///
/// The service's list query matches on substrings, so the results are
/// filtered down to exact name hits. A `NotFound` from the service counts
/// as zero; throttling errors are retried per `retry` and the original
/// error is returned once the budget is spent.
pub async fn count_jobs_by_name<C: JobControl>(
    control: &C,
    job_name: &str,
    retry: &RetryPolicy,
) -> Result<usize, ClientError> {
    let result = retry
        .run(|| control.list_jobs(job_name), ClientError::is_throttled)
        .await;

    match result {
        Ok(summaries) => Ok(summaries
            .iter()
            .filter(|s| s.job_name == job_name)
            .count()),
        Err(e) if e.is_not_found() => Ok(0),
        Err(e) => Err(e),
    }
}
