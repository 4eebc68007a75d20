//! HTTP feed retrieval configuration.

use std::time::Duration;
use url::Url;

/// A pass-through endpoint used to fetch a feed from another origin.
///
/// Any endpoint that proxies a GET for the percent-encoded URL appended to
/// its base and returns the body verbatim can be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    endpoint: String,
}

impl RelayConfig {
    /// The relay used when none is configured explicitly.
    pub const DEFAULT_ENDPOINT: &'static str = "https://corsproxy.io/?";

    /// Creates a relay configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, url::ParseError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)?;
        Ok(Self { endpoint })
    }

    /// The relay endpoint as configured.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the relay URL that fetches `feed_url`.
    pub fn compose(&self, feed_url: &Url) -> String {
        format!("{}{}", self.endpoint, urlencoding::encode(feed_url.as_str()))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Configuration for the HTTP feed retriever.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Absolute URL of the calendar feed.
    pub feed_url: Url,

    /// Relay to fetch through. `None` fetches the feed directly.
    pub relay: Option<RelayConfig>,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl FeedConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given feed URL, fetched through the
    /// default relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(feed_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(feed_url.as_ref())?;
        Ok(Self {
            feed_url: parsed,
            relay: Some(RelayConfig::default()),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("feedgrid/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets the relay.
    pub fn with_relay(mut self, relay: RelayConfig) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Fetches the feed directly, without a relay.
    pub fn without_relay(mut self) -> Self {
        self.relay = None;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The URL actually requested: the relay URL, or the feed URL itself.
    pub fn request_url(&self) -> String {
        match self.relay {
            Some(ref relay) => relay.compose(&self.feed_url),
            None => self.feed_url.to_string(),
        }
    }
}
