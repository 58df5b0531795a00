//! Vigil Monitor
//!
//! Client-side monitoring engine for long-running remote jobs: polls job
//! status at a bounded cadence, tails a growing set of per-worker log
//! streams, merges them into one chronological, de-duplicated sequence,
//! and settles exactly once when the job reaches a terminal state.
//!
//! # Example
//!
//! ```no_run
//! use vigil_client::JobServiceClient;
//! use vigil_core::domain::job::JobKind;
//! use vigil_monitor::{JobPoller, PollOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobServiceClient::new("http://localhost:8080");
//!
//!     let mut poller = JobPoller::new(
//!         client.jobs(JobKind::Training),
//!         client.clone(),
//!         "train-42",
//!         2,
//!         PollOptions::default(),
//!     );
//!
//!     let final_status = poller.wait_for_completion().await?;
//!     println!("job settled: {:?}", final_status.status);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod jobs;
pub mod multiplex;
pub mod poller;
pub mod retry;
pub mod status;
pub mod streams;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use error::{MonitorError, Result};
pub use jobs::count_jobs_by_name;
pub use multiplex::{LogMultiplexer, MergedEvent};
pub use poller::{JobPoller, PollOptions, PollState, TickOutcome, wait_for_terminal};
pub use retry::{Backoff, RetryPolicy};
pub use status::{format_status_line, status_changed};
pub use streams::LogStreamSet;
