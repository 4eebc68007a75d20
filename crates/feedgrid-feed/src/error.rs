//! Error types for feed retrieval and decoding.
//!
//! Only whole-feed failures are errors. A single malformed event inside an
//! otherwise valid feed is skipped and counted by the decoder instead.

use std::fmt;
use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// Transport failure while retrieving the feed: DNS, connect, timeout,
    /// relay unreachable, unreadable body.
    FeedUnavailable,
    /// The feed text is not valid at the outer grammar level: unterminated
    /// or mismatched blocks, unparsable content lines.
    MalformedFeed,
    /// Invalid feed or relay configuration.
    Configuration,
}

impl FeedErrorCode {
    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeedUnavailable => "feed_unavailable",
            Self::MalformedFeed => "malformed_feed",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while loading a feed.
#[derive(Debug, Error)]
pub struct FeedError {
    /// The error code categorizing this error.
    code: FeedErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The feed source that produced this error (e.g., "http", "file").
    source_name: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_name: None,
            source: None,
        }
    }

    /// Creates a retrieval failure.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::FeedUnavailable, message)
    }

    /// Creates an outer-grammar decode failure.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::MalformedFeed, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Configuration, message)
    }

    /// Sets the feed source name for this error.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Sets the underlying cause of this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the feed source name, if set.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.source_name {
            write!(f, "[{}] ", name)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
