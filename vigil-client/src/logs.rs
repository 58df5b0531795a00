//! Log-query API endpoints

use async_trait::async_trait;
use vigil_core::dto::log::{GetEventsResponse, ListStreamsResponse};

use crate::JobServiceClient;
use crate::api::LogQuery;
use crate::error::Result;

impl JobServiceClient {
    /// List log stream names with the given prefix
    ///
    /// One stream exists per worker instance of a job, named
    /// `<job_name>/<instance_token>`. Streams appear as workers come
    /// online, so repeated calls may return a growing set.
    pub async fn list_log_streams(&self, prefix: &str) -> Result<Vec<String>> {
        let url = format!("{}/api/logs/streams", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("prefix", prefix)])
            .send()
            .await?;

        let body: ListStreamsResponse = self.handle_response(response).await?;
        Ok(body.streams)
    }

    /// Fetch one page of events from a stream
    ///
    /// Stream names contain `/`, so the stream is passed as a query
    /// parameter rather than a path segment.
    pub async fn get_log_events(
        &self,
        stream: &str,
        token: Option<&str>,
    ) -> Result<GetEventsResponse> {
        let url = format!("{}/api/logs/events", self.base_url);
        let mut request = self.client.get(&url).query(&[("stream", stream)]);
        if let Some(token) = token {
            request = request.query(&[("token", token)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl LogQuery for JobServiceClient {
    async fn list_streams(&self, prefix: &str) -> Result<Vec<String>> {
        self.list_log_streams(prefix).await
    }

    async fn get_events(&self, stream: &str, token: Option<String>) -> Result<GetEventsResponse> {
        self.get_log_events(stream, token.as_deref()).await
    }
}
