//! Log domain types

use serde::{Deserialize, Serialize};

/// A single log line from one worker instance of a job
///
/// Timestamps are monotonic-ish but not guaranteed strictly increasing or
/// unique, within or across streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub message: String,
}
