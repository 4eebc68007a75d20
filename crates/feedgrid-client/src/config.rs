//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/feedgrid/config.toml` by default. Every section and key is
//! optional:
//!
//! ```toml
//! [feed]
//! url = "https://calendar.google.com/calendar/ical/.../public/basic.ics"
//! relay = "https://corsproxy.io/?"   # "" fetches the feed directly
//! timeout_secs = 30
//! default_timezone = ""              # floating times and dates; "" follows [display]
//!
//! [display]
//! timezone = "America/Los_Angeles"
//! locale = "en_US"
//!
//! [links]
//! base_url = "https://calendar.google.com/calendar/render"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use feedgrid_core::{DEFAULT_DEEP_LINK_BASE, DeepLinkBuilder, InteractionState, TooltipFormatter, parse_locale};
use feedgrid_feed::{FeedConfig, FeedDecoder, RelayConfig};
use serde::{Deserialize, Serialize};

/// The feed loaded when none is configured.
pub const DEFAULT_FEED_URL: &str =
    "https://calendar.google.com/calendar/ical/4kki6p5cjl2oacr0eq9ei6ojsc%40group.calendar.google.com/public/basic.ics";

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the feedgrid client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Feed retrieval settings.
    pub feed: FeedSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// Deep link settings.
    pub links: LinkSettings,
}

/// Where and how the feed is fetched and decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Absolute URL of the iCalendar feed.
    pub url: String,

    /// Relay endpoint the feed URL is appended to. Empty for a direct fetch.
    pub relay: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// IANA zone for floating times and date-only values. Empty means the
    /// display zone, so all-day events land on their own day.
    pub default_timezone: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            relay: RelayConfig::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: FeedConfig::DEFAULT_TIMEOUT_SECS,
            default_timezone: String::new(),
        }
    }
}

impl FeedSettings {
    /// The relay endpoint, or `None` for a direct fetch.
    pub fn relay(&self) -> Option<&str> {
        let relay = self.relay.trim();
        if relay.is_empty() { None } else { Some(relay) }
    }

    /// Converts to retriever configuration.
    pub fn to_feed_config(&self) -> Result<FeedConfig, String> {
        let config = FeedConfig::new(&self.url)
            .map_err(|e| format!("invalid feed url '{}': {}", self.url, e))?
            .with_timeout(Duration::from_secs(self.timeout_secs));

        match self.relay() {
            Some(endpoint) => {
                let relay = RelayConfig::new(endpoint)
                    .map_err(|e| format!("invalid relay '{}': {}", endpoint, e))?;
                Ok(config.with_relay(relay))
            }
            None => Ok(config.without_relay()),
        }
    }
}

/// How dates are shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// IANA zone dates are displayed in.
    pub timezone: String,

    /// POSIX locale for day and month names.
    pub locale: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            locale: "en_US".to_string(),
        }
    }
}

impl DisplaySettings {
    /// Builds the tooltip formatter.
    pub fn formatter(&self) -> Result<TooltipFormatter, String> {
        let zone = parse_zone(&self.timezone)?;
        let locale = parse_locale(&self.locale).ok_or_else(|| format!("unknown locale '{}'", self.locale))?;
        Ok(TooltipFormatter::new(zone, locale))
    }
}

/// Where "add to calendar" links point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Event-creation endpoint.
    pub base_url: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEEP_LINK_BASE.to_string(),
        }
    }
}

impl LinkSettings {
    /// Builds the deep link builder.
    pub fn builder(&self) -> Result<DeepLinkBuilder, String> {
        DeepLinkBuilder::new(&self.base_url).map_err(|e| format!("invalid links base_url '{}': {}", self.base_url, e))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedgrid")
    }

    /// Builds the feed decoder.
    ///
    /// Floating times and dates resolve in `[feed].default_timezone`, or in
    /// the display zone when that is empty.
    pub fn decoder(&self) -> Result<FeedDecoder, String> {
        let name = match self.feed.default_timezone.trim() {
            "" => &self.display.timezone,
            name => name,
        };
        Ok(FeedDecoder::new(parse_zone(name)?))
    }

    /// Builds the interaction state for a presentation adapter.
    pub fn interaction_state(&self) -> Result<InteractionState, String> {
        Ok(InteractionState::new(self.display.formatter()?, self.links.builder()?))
    }

    /// Checks every setting, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.feed.to_feed_config()?;
        self.decoder()?;
        self.interaction_state()?;
        Ok(())
    }
}

fn parse_zone(name: &str) -> Result<Tz, String> {
    Tz::from_str(name.trim()).map_err(|_| format!("unknown timezone '{}'", name))
}
