//! Script-driven fakes for the API traits, used by unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use vigil_client::error::Result;
use vigil_client::{ClientError, JobControl, LogQuery};
use vigil_core::domain::job::{JobStatus, JobStatusSnapshot, StatusTransition};
use vigil_core::domain::log::LogEvent;
use vigil_core::dto::job::JobSummary;
use vigil_core::dto::log::GetEventsResponse;

pub fn event(ts_millis: i64, message: &str) -> LogEvent {
    LogEvent {
        timestamp: Utc.timestamp_millis_opt(ts_millis).unwrap(),
        message: message.to_string(),
    }
}

pub fn snapshot(status: JobStatus) -> JobStatusSnapshot {
    JobStatusSnapshot {
        job_name: "test-job".to_string(),
        status,
        failure_reason: match status {
            JobStatus::Failed => Some("Unknown".to_string()),
            _ => None,
        },
        secondary_transitions: vec![StatusTransition {
            status: format!("{:?}", status),
            message: format!("{:?}", status),
            timestamp: Utc.with_ymd_and_hms(2018, 2, 17, 7, 15, 0).unwrap(),
        }],
        started_at: None,
        completed_at: None,
    }
}

/// Fake job-control API fed by a queue of scripted describe results
#[derive(Default)]
pub struct FakeControl {
    describes: Mutex<VecDeque<Result<JobStatusSnapshot>>>,
    lists: Mutex<VecDeque<Result<Vec<JobSummary>>>>,
    pub describe_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_describe(self, results: Vec<Result<JobStatusSnapshot>>) -> Self {
        *self.describes.lock().unwrap() = results.into();
        self
    }

    pub fn script_list(self, results: Vec<Result<Vec<JobSummary>>>) -> Self {
        *self.lists.lock().unwrap() = results.into();
        self
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobControl for FakeControl {
    async fn describe_job(&self, _job_name: &str) -> Result<JobStatusSnapshot> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.describes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected describe_job call")
    }

    async fn stop_job(&self, _job_name: &str) -> Result<()> {
        Ok(())
    }

    async fn list_jobs(&self, _name_contains: &str) -> Result<Vec<JobSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected list_jobs call")
    }
}

/// Fake log-query API
///
/// Stream listings are scripted as a queue; event pages are scripted per
/// stream. A stream with no remaining pages reports an empty batch, the
/// same way the real service signals "no new data for now".
#[derive(Default)]
pub struct FakeLogs {
    streams: Mutex<VecDeque<Result<Vec<String>>>>,
    events: Mutex<HashMap<String, VecDeque<Result<GetEventsResponse>>>>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub tokens_seen: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_streams(self, results: Vec<Result<Vec<String>>>) -> Self {
        *self.streams.lock().unwrap() = results.into();
        self
    }

    pub fn script_events(self, stream: &str, pages: Vec<Result<GetEventsResponse>>) -> Self {
        self.events
            .lock()
            .unwrap()
            .insert(stream.to_string(), pages.into());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

pub fn page(events: Vec<LogEvent>, next_token: Option<&str>) -> GetEventsResponse {
    GetEventsResponse {
        events,
        next_token: next_token.map(str::to_string),
    }
}

#[async_trait]
impl LogQuery for FakeLogs {
    async fn list_streams(&self, _prefix: &str) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.streams
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_events(&self, stream: &str, token: Option<String>) -> Result<GetEventsResponse> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen
            .lock()
            .unwrap()
            .push((stream.to_string(), token));
        self.events
            .lock()
            .unwrap()
            .get_mut(stream)
            .and_then(|pages| pages.pop_front())
            .unwrap_or_else(|| Ok(page(Vec::new(), None)))
    }
}

pub fn throttled() -> ClientError {
    ClientError::Throttled("ThrottlingException".to_string())
}

pub fn not_found() -> ClientError {
    ClientError::NotFound("ResourceNotFound".to_string())
}
