//! Log DTOs for the remote log-query API

use serde::{Deserialize, Serialize};

use crate::domain::log::LogEvent;

/// Response to a stream listing query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStreamsResponse {
    pub streams: Vec<String>,
}

/// One page of log events from a single stream
///
/// `next_token` is an opaque cursor marking where to resume fetching from.
/// The service may return the same token with an empty event list, which
/// means "no new data for now", not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventsResponse {
    pub events: Vec<LogEvent>,
    pub next_token: Option<String>,
}
