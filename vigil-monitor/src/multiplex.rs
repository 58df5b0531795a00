//! Log multiplexing
//!
//! Pulls new events from every tracked stream and merges them into one
//! ordered, de-duplicated output sequence. Each drain call produces a
//! finite batch and is restartable from the stored per-stream positions,
//! so the caller can tick it repeatedly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use vigil_client::{ClientError, LogQuery};
use vigil_core::domain::log::LogEvent;

use crate::retry::RetryPolicy;

/// A log event tagged with the ordinal of the stream it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEvent {
    /// Index of the source stream in the tracked set (instance ordinal)
    pub stream: usize,
    pub event: LogEvent,
}

/// Read position within one stream
///
/// `last_batch` holds the (timestamp, message) keys of the immediately
/// preceding non-empty batch. The service may re-return the final events
/// of that batch at a page boundary; anything further back is never
/// re-checked (single-batch lookback), which bounds memory to one batch
/// per stream.
#[derive(Debug, Default)]
struct StreamPosition {
    token: Option<String>,
    last_batch: Vec<(DateTime<Utc>, String)>,
}

/// Merges per-stream event fetches into one output sequence
///
/// Positions are owned exclusively by one multiplexer and committed only
/// after a successful fetch, so aborting between drains never corrupts
/// them.
#[derive(Debug, Default)]
pub struct LogMultiplexer {
    positions: HashMap<String, StreamPosition>,
}

impl LogMultiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches new events for every stream and appends them to `out`
    ///
    /// Output is grouped by stream in the order of `streams` (all of stream
    /// 0's new events before stream 1's), with per-stream source order
    /// preserved; it is not globally time-sorted.
    ///
    /// A fetch failure on one stream does not prevent the remaining
    /// streams from being fetched: successful streams commit their
    /// positions and their events stay in `out`, and the first error is
    /// returned once all streams have been attempted.
    pub async fn drain<L: LogQuery>(
        &mut self,
        logs: &L,
        streams: &[String],
        retry: &RetryPolicy,
        out: &mut Vec<MergedEvent>,
    ) -> Result<(), ClientError> {
        let mut first_error = None;

        for (index, name) in streams.iter().enumerate() {
            let position = self.positions.entry(name.clone()).or_default();
            let token = position.token.clone();

            let response = retry
                .run(|| logs.get_events(name, token.clone()), ClientError::is_retryable)
                .await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    warn!(stream = %name, error = %e, "log fetch failed");
                    first_error.get_or_insert(e);
                    continue;
                }
            };

            if response.next_token.is_some() {
                position.token = response.next_token;
            }

            // An empty batch means "no more new data for now"; keep the
            // previous batch keys so boundary duplicates in a later page
            // are still caught.
            if response.events.is_empty() {
                continue;
            }

            let batch_keys: Vec<(DateTime<Utc>, String)> = response
                .events
                .iter()
                .map(|e| (e.timestamp, e.message.clone()))
                .collect();

            for event in response.events {
                let key = (event.timestamp, event.message.clone());
                if position.last_batch.contains(&key) {
                    continue;
                }
                out.push(MergedEvent {
                    stream: index,
                    event,
                });
            }

            position.last_batch = batch_keys;
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
