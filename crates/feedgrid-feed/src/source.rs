//! FeedSource trait definition.
//!
//! A [`FeedSource`] produces the raw text of one calendar feed. The HTTP
//! retriever is the production implementation; [`StaticFeedSource`] serves
//! text already in memory and [`ErrorFeedSource`] always fails.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::{FeedError, FeedResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep [`FeedSource`] object-safe so callers can hold a
/// `Box<dyn FeedSource>` chosen from configuration.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The undecoded body of a calendar feed.
///
/// Produced once per fetch and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeedText(String);

impl RawFeedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RawFeedText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawFeedText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for RawFeedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A place calendar feed text can be fetched from.
///
/// # Implementation Notes
///
/// - A fetch is a single attempt; implementations do not retry or cache
/// - Transport failures are reported as
///   [`FeedErrorCode::FeedUnavailable`](crate::error::FeedErrorCode::FeedUnavailable)
pub trait FeedSource: Send + Sync {
    /// Returns a short name for logs and errors (e.g., "http", "file").
    fn name(&self) -> &str;

    /// Fetches the feed text.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the feed cannot be retrieved.
    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawFeedText>>;
}

/// A source serving feed text that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticFeedSource {
    name: String,
    text: RawFeedText,
}

impl StaticFeedSource {
    pub fn new(name: impl Into<String>, text: impl Into<RawFeedText>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl FeedSource for StaticFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawFeedText>> {
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }
}

/// A source that always fails.
///
/// Stands in for a retriever that could not be constructed, and simulates
/// network failures in tests.
#[derive(Debug)]
pub struct ErrorFeedSource {
    name: String,
    error: FeedError,
}

impl ErrorFeedSource {
    pub fn new(name: impl Into<String>, error: FeedError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl FeedSource for ErrorFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, FeedResult<RawFeedText>> {
        // FeedError carries a boxed cause and is not Clone
        let error = FeedError::new(self.error.code(), self.error.message())
            .with_source_name(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorCode;

    #[test]
    fn raw_feed_text_accessors() {
        let raw = RawFeedText::from("BEGIN:VCALENDAR");
        assert_eq!(raw.as_str(), "BEGIN:VCALENDAR");
        assert_eq!(raw.len(), 15);
        assert!(!raw.is_empty());
        assert!(RawFeedText::new("").is_empty());
    }

    #[tokio::test]
    async fn static_source_returns_text() {
        let source = StaticFeedSource::new("file", "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
        assert_eq!(source.name(), "file");

        let text = source.fetch().await.unwrap();
        assert!(text.as_str().starts_with("BEGIN:VCALENDAR"));

        // Fetching again yields the same text
        assert_eq!(source.fetch().await.unwrap(), text);
    }

    #[tokio::test]
    async fn error_source_returns_error() {
        let source = ErrorFeedSource::new("http", FeedError::unavailable("dns lookup failed"));
        assert_eq!(source.name(), "http");

        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::FeedUnavailable);
        assert_eq!(err.source_name(), Some("http"));
        assert_eq!(err.message(), "dns lookup failed");
    }

    #[tokio::test]
    async fn sources_are_object_safe() {
        let sources: Vec<Box<dyn FeedSource>> = vec![
            Box::new(StaticFeedSource::new("file", "")),
            Box::new(ErrorFeedSource::new("http", FeedError::unavailable("down"))),
        ];
        assert!(sources[0].fetch().await.is_ok());
        assert!(sources[1].fetch().await.is_err());
    }
}
