//! HTTP feed retriever.
//!
//! Issues a single GET for the configured feed (through the relay when one is
//! configured) and returns the body as text whatever the status code.

use reqwest::Client;
use tracing::{debug, info};

use crate::error::{FeedError, FeedResult};
use crate::source::{BoxFuture, FeedSource, RawFeedText};

use super::config::FeedConfig;

/// Fetches calendar feeds over HTTP.
pub struct HttpFeedRetriever {
    /// The underlying HTTP client.
    client: Client,
    /// Configuration.
    config: FeedConfig,
}

impl HttpFeedRetriever {
    /// Creates a new retriever with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: FeedConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                FeedError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source_name("http")
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    async fn get(&self) -> FeedResult<RawFeedText> {
        let url = self.config.request_url();
        info!(feed = %self.config.feed_url, relayed = self.config.relay.is_some(), "Fetching calendar feed");

        let response = self.client.get(&url).send().await.map_err(|e| {
            FeedError::unavailable(format!("Request failed: {}", e))
                .with_source_name("http")
                .with_source(e)
        })?;

        // The status is informational only: whatever body came back is decoded
        debug!(status = %response.status(), "Received feed response");

        let body = response.text().await.map_err(|e| {
            FeedError::unavailable(format!("Failed to read response: {}", e))
                .with_source_name("http")
                .with_source(e)
        })?;

        debug!(bytes = body.len(), "Read feed body");
        Ok(RawFeedText::from(body))
    }
}

impl FeedSource for HttpFeedRetriever {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawFeedText>> {
        Box::pin(self.get())
    }
}
