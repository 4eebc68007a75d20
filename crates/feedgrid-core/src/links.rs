//! "Add to calendar" deep links.
//!
//! [`DeepLinkBuilder`] turns a [`NormalizedEvent`] into a URI that opens an
//! external calendar's event-creation view with the event pre-filled.
//!
//! Free-text fields are percent-encoded; timestamps use the compact UTC form
//! `YYYYMMDDTHHMMSSZ`. An event without an end gets a zero-length range.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use feedgrid_core::{DeepLinkBuilder, NormalizedEvent};
//!
//! let event = NormalizedEvent::new("Club Fair & Fun", Utc.with_ymd_and_hms(2025, 9, 5, 16, 0, 0).unwrap());
//! let link = DeepLinkBuilder::default().deep_link(&event);
//! assert!(link.as_str().contains("text=Club%20Fair%20%26%20Fun"));
//! ```

use chrono::{DateTime, Utc};
use url::Url;

use crate::event::{CalendarDeepLink, NormalizedEvent};

/// Default event-creation endpoint.
pub const DEFAULT_DEEP_LINK_BASE: &str = "https://calendar.google.com/calendar/render";

const COMPACT_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats an instant as `YYYYMMDDTHHMMSSZ`, dropping fractional seconds.
pub fn compact_utc(instant: DateTime<Utc>) -> String {
    instant.format(COMPACT_UTC_FORMAT).to_string()
}

/// Builds deep links against a fixed event-creation endpoint.
#[derive(Debug, Clone)]
pub struct DeepLinkBuilder {
    base: Url,
}

impl Default for DeepLinkBuilder {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_DEEP_LINK_BASE).expect("default deep link base is a valid URL"),
        }
    }
}

impl DeepLinkBuilder {
    /// Creates a builder for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL.
    pub fn new(base: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base.as_ref())?,
        })
    }

    /// The event-creation endpoint.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the deep link for `event`.
    pub fn deep_link(&self, event: &NormalizedEvent) -> CalendarDeepLink {
        let start = compact_utc(event.start);
        let end = event.end.map(compact_utc).unwrap_or_else(|| start.clone());

        let mut base = self.base.clone();
        base.set_query(None);
        base.set_fragment(None);

        CalendarDeepLink::new(format!(
            "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
            base,
            urlencoding::encode(&event.title),
            start,
            end,
            urlencoding::encode(event.description()),
            urlencoding::encode(event.location()),
        ))
    }
}
