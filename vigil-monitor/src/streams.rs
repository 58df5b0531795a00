//! Log stream discovery
//!
//! A job writes one log stream per worker instance, named
//! `<job_name>/<instance_token>`. Streams are created lazily as workers
//! come online, so discovery runs on every tick until the expected number
//! of streams is known.

use tracing::debug;
use vigil_client::{ClientError, LogQuery};

use crate::retry::RetryPolicy;

/// The set of known log streams for one monitored job
#[derive(Debug)]
pub struct LogStreamSet {
    prefix: String,
    instance_count: usize,
    names: Vec<String>,
}

impl LogStreamSet {
    /// Creates a stream set expecting `instance_count` worker streams
    pub fn new(job_name: &str, instance_count: usize) -> Self {
        Self {
            prefix: format!("{}/", job_name),
            instance_count,
            names: Vec::new(),
        }
    }

    /// Stream names in first-seen order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether all expected streams have been discovered
    ///
    /// Once complete, discovery is skipped: the service does not add or
    /// remove streams for existing instances.
    pub fn is_complete(&self) -> bool {
        self.names.len() >= self.instance_count
    }

    /// Discovers newly created streams, preserving first-seen order
    ///
    /// A `NotFound` from the service means the log group does not exist
    /// yet (the job has not started writing logs) and yields the current,
    /// possibly empty, set rather than an error.
    pub async fn discover<L: LogQuery>(
        &mut self,
        logs: &L,
        retry: &RetryPolicy,
    ) -> Result<&[String], ClientError> {
        if self.is_complete() {
            return Ok(&self.names);
        }

        let prefix = self.prefix.clone();
        let fetched = match retry
            .run(|| logs.list_streams(&prefix), ClientError::is_retryable)
            .await
        {
            Ok(streams) => streams,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e),
        };

        for name in fetched {
            if !self.names.contains(&name) {
                debug!(stream = %name, "discovered log stream");
                self.names.push(name);
            }
        }

        Ok(&self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeLogs, not_found};

    fn zero_retry() -> RetryPolicy {
        RetryPolicy::constant(0, std::time::Duration::ZERO)
    }

    #[tokio::test]
    async fn test_discover_collects_streams() {
        let logs = FakeLogs::new()
            .script_streams(vec![Ok(vec!["test-job/a".to_string(), "test-job/b".to_string()])]);
        let mut set = LogStreamSet::new("test-job", 2);

        let names = set.discover(&logs, &zero_retry()).await.unwrap();
        assert_eq!(names, vec!["test-job/a", "test-job/b"]);
        assert!(set.is_complete());
    }

    #[tokio::test]
    async fn test_discover_tolerates_missing_log_group() {
        let logs = FakeLogs::new().script_streams(vec![Err(not_found())]);
        let mut set = LogStreamSet::new("test-job", 1);

        let names = set.discover(&logs, &zero_retry()).await.unwrap();
        assert!(names.is_empty());
        assert!(!set.is_complete());
    }

    #[tokio::test]
    async fn test_discovery_skipped_once_complete() {
        let logs = FakeLogs::new().script_streams(vec![Ok(vec!["test-job/a".to_string()])]);
        let mut set = LogStreamSet::new("test-job", 1);

        set.discover(&logs, &zero_retry()).await.unwrap();
        set.discover(&logs, &zero_retry()).await.unwrap();
        assert_eq!(logs.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_first_seen_order_is_stable() {
        let logs = FakeLogs::new().script_streams(vec![
            Ok(vec!["test-job/b".to_string()]),
            Ok(vec!["test-job/a".to_string(), "test-job/b".to_string()]),
        ]);
        let mut set = LogStreamSet::new("test-job", 2);

        set.discover(&logs, &zero_retry()).await.unwrap();
        let names = set.discover(&logs, &zero_retry()).await.unwrap();
        assert_eq!(names, vec!["test-job/b", "test-job/a"]);
    }
}
