//! Vigil HTTP Client
//!
//! A simple, type-safe HTTP client for communicating with the remote
//! job-execution service.
//!
//! This crate provides the request/response mapping for job control and log
//! queries, plus the [`JobControl`] and [`LogQuery`] traits the monitoring
//! engine is generic over.
//!
//! # Example
//!
//! ```no_run
//! use vigil_client::JobServiceClient;
//! use vigil_core::domain::job::JobKind;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobServiceClient::new("http://localhost:8080");
//!
//!     let snapshot = client.describe_job(JobKind::Training, "train-42").await?;
//!     println!("job status: {:?}", snapshot.status);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod jobs;
mod logs;

// Re-export commonly used types
pub use api::{JobControl, LogQuery};
pub use error::{ClientError, Result};
pub use jobs::JobKindClient;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the remote job-execution service
///
/// This client provides methods for the service endpoints the monitor
/// consumes, organized into two groups:
/// - Job control (submit, describe, stop, list)
/// - Log queries (stream listing, event fetching)
#[derive(Debug, Clone)]
pub struct JobServiceClient {
    /// Base URL of the job service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobServiceClient {
    /// Create a new job-service client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the job service API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new job-service client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    /// Every remote call inherits the transport-level timeout configured
    /// here; the monitor never blocks indefinitely on a single call.
    ///
    /// # Example
    /// ```
    /// use vigil_client::JobServiceClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobServiceClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the job service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and classifies failures into the
    /// [`ClientError`] taxonomy, or deserializes the body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_status(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., stop operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_status(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JobServiceClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = JobServiceClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = JobServiceClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
