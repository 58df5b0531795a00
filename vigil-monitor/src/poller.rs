//! Job poller
//!
//! The top-level state machine for one monitored job: alternates between
//! draining the log multiplexer and polling job status, decides when the
//! job is terminal, and flushes trailing logs exactly once before settling.

use std::time::{Duration, Instant};

use tracing::info;
use vigil_client::{ClientError, JobControl, LogQuery};
use vigil_core::domain::job::JobStatusSnapshot;

use crate::error::{MonitorError, Result};
use crate::multiplex::{LogMultiplexer, MergedEvent};
use crate::retry::RetryPolicy;
use crate::status::{format_status_line, status_changed};
use crate::streams::LogStreamSet;

/// Monitoring state for one job
///
/// Transitions are monotonic: `WaitInProgress -> JobComplete -> Complete`,
/// never backwards. `JobComplete` means the job finished but trailing logs
/// have not been flushed yet; `Complete` is fully terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    WaitInProgress,
    JobComplete,
    Complete,
}

/// Tunables for one monitoring session
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Sleep between ticks in the wait loops
    pub poll_interval: Duration,
    /// Minimum spacing between status queries while logs are draining,
    /// so the status endpoint is not hammered on every tick
    pub describe_interval: Duration,
    /// Retry policy for idempotent read calls
    pub retry: RetryPolicy,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            describe_interval: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of one poll tick
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Merged, de-duplicated log events fetched this tick
    pub events: Vec<MergedEvent>,
    /// Rendered secondary-status line, present when the status changed
    pub status_line: Option<String>,
    /// First per-stream fetch error of the tick, deferred until all
    /// streams were attempted. Events from healthy streams are still in
    /// `events`.
    pub stream_error: Option<ClientError>,
}

/// Client-side state machine monitoring one remote job
///
/// `tick` is the pull-based "lazy sequence" of merged log events: each call
/// produces a finite batch and the poller is restartable from its stored
/// stream positions. One poller owns its positions exclusively; never run
/// two monitoring sessions for the same job concurrently.
pub struct JobPoller<C, L> {
    control: C,
    logs: L,
    job_name: String,
    options: PollOptions,
    state: PollState,
    streams: LogStreamSet,
    mux: LogMultiplexer,
    last_snapshot: Option<JobStatusSnapshot>,
    last_describe_call: Option<Instant>,
}

impl<C: JobControl, L: LogQuery> JobPoller<C, L> {
    /// Creates a poller for one job expected to run on `instance_count`
    /// workers
    ///
    /// # Arguments
    /// * `control` - Job-control handle for the job's kind (caller-owned)
    /// * `logs` - Log-query handle
    /// * `job_name` - The job to monitor
    /// * `instance_count` - Expected number of worker log streams
    /// * `options` - Polling tunables
    pub fn new(
        control: C,
        logs: L,
        job_name: impl Into<String>,
        instance_count: usize,
        options: PollOptions,
    ) -> Self {
        let job_name = job_name.into();
        let streams = LogStreamSet::new(&job_name, instance_count);
        Self {
            control,
            logs,
            job_name,
            options,
            state: PollState::WaitInProgress,
            streams,
            mux: LogMultiplexer::new(),
            last_snapshot: None,
            last_describe_call: None,
        }
    }

    /// Enter directly at a later state when the caller already knows the
    /// job finished
    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// The most recent status snapshot, if any describe has happened
    pub fn last_status(&self) -> Option<&JobStatusSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Runs one poll tick
    ///
    /// Per tick: discover new log streams (while the job is running and
    /// streams are missing), drain all known streams, then query job
    /// status at most once per `describe_interval`. A terminal status
    /// moves the poller to `JobComplete`; the next tick flushes trailing
    /// logs and settles at `Complete`. Once `Complete`, ticks return
    /// immediately and make no remote calls.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::default();

        if self.state == PollState::Complete {
            return Ok(outcome);
        }

        if self.state == PollState::WaitInProgress && !self.streams.is_complete() {
            self.streams.discover(&self.logs, &self.options.retry).await?;
        }

        if let Err(e) = self
            .mux
            .drain(
                &self.logs,
                self.streams.names(),
                &self.options.retry,
                &mut outcome.events,
            )
            .await
        {
            // Leave the state untouched so the caller can decide whether
            // to abort or tick again from the committed positions.
            outcome.stream_error = Some(e);
            return Ok(outcome);
        }

        match self.state {
            PollState::WaitInProgress => {
                if self.describe_due() {
                    let snapshot = self.describe().await?;
                    self.last_describe_call = Some(Instant::now());

                    if status_changed(self.last_snapshot.as_ref(), &snapshot) {
                        if let Some(line) =
                            format_status_line(self.last_snapshot.as_ref(), &snapshot)
                        {
                            info!(job = %self.job_name, "{}", line);
                            outcome.status_line = Some(line);
                        }
                    }

                    let terminal = snapshot.status.is_terminal();
                    self.last_snapshot = Some(snapshot);
                    if terminal {
                        self.state = PollState::JobComplete;
                    }
                }
            }
            PollState::JobComplete => {
                // Trailing logs were just flushed by the drain above;
                // settle for good.
                self.state = PollState::Complete;
            }
            PollState::Complete => unreachable!("checked at tick entry"),
        }

        Ok(outcome)
    }

    /// Next batch of the lazy event sequence
    ///
    /// Returns `Ok(None)` once the poller has settled at `Complete`; a
    /// deferred per-stream error ends the sequence as `Err`. The caller
    /// paces consecutive calls with its own sleep.
    pub async fn next_events(&mut self) -> Result<Option<Vec<MergedEvent>>> {
        if self.state == PollState::Complete {
            return Ok(None);
        }
        let outcome = self.tick().await?;
        if let Some(e) = outcome.stream_error {
            return Err(e.into());
        }
        Ok(Some(outcome.events))
    }

    /// Monitors the job to completion, logging every merged event
    ///
    /// Loops `tick` with `poll_interval` sleeps until the poller settles,
    /// then checks the final status: a `Failed` job raises
    /// [`MonitorError::JobFailed`] with the service's failure reason, any
    /// other terminal status returns the final snapshot.
    pub async fn wait_for_completion(&mut self) -> Result<JobStatusSnapshot> {
        loop {
            let outcome = self.tick().await?;
            for merged in &outcome.events {
                info!(job = %self.job_name, stream = merged.stream, "{}", merged.event.message);
            }
            if let Some(e) = outcome.stream_error {
                return Err(e.into());
            }
            if self.state == PollState::Complete {
                break;
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }

        // A snapshot exists unless the caller entered directly at
        // Complete; describe once in that case.
        let snapshot = match &self.last_snapshot {
            Some(snapshot) => snapshot.clone(),
            None => self.describe().await?,
        };

        if snapshot.status.is_failure() {
            return Err(MonitorError::JobFailed {
                job_name: self.job_name.clone(),
                reason: snapshot
                    .failure_reason
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }

        Ok(snapshot)
    }

    fn describe_due(&self) -> bool {
        match self.last_describe_call {
            None => true,
            Some(at) => at.elapsed() >= self.options.describe_interval,
        }
    }

    async fn describe(&self) -> std::result::Result<JobStatusSnapshot, ClientError> {
        let control = &self.control;
        let job_name = self.job_name.as_str();
        self.options
            .retry
            .run(|| control.describe_job(job_name), ClientError::is_retryable)
            .await
    }
}

/// Waits for a job to reach a terminal status without tailing logs
///
/// Describes the job every `poll_interval`, logging secondary-status
/// changes. A `Failed` status raises [`MonitorError::JobFailed`]
/// immediately, with no further status queries; any other terminal status
/// returns the snapshot.
pub async fn wait_for_terminal<C: JobControl>(
    control: &C,
    job_name: &str,
    poll_interval: Duration,
    retry: &RetryPolicy,
) -> Result<JobStatusSnapshot> {
    let mut last: Option<JobStatusSnapshot> = None;

    loop {
        let snapshot = retry
            .run(|| control.describe_job(job_name), ClientError::is_retryable)
            .await?;

        if status_changed(last.as_ref(), &snapshot) {
            if let Some(line) = format_status_line(last.as_ref(), &snapshot) {
                info!(job = %job_name, "{}", line);
            }
        }

        if snapshot.status.is_failure() {
            return Err(MonitorError::JobFailed {
                job_name: job_name.to_string(),
                reason: snapshot
                    .failure_reason
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }

        if snapshot.status.is_terminal() {
            return Ok(snapshot);
        }

        last = Some(snapshot);
        tokio::time::sleep(poll_interval).await;
    }
}
