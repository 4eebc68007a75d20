//! Decoded calendar component records.
//!
//! This module defines [`CalendarComponentRecord`], the structural unit the
//! decoder produces from a feed before events are normalized.
//!
//! Times are already resolved to UTC here; the record keeps the all-day flag
//! so the projector can tell a date-only start from a midnight start.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One decoded unit from a calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarComponentRecord {
    /// A `VEVENT` component.
    Event(EventRecord),
    /// Any other component (`VTIMEZONE`, `VTODO`, `VALARM`, ...). Not consumed.
    Other {
        /// The component name as written in the feed, upper-cased.
        name: String,
    },
}

impl CalendarComponentRecord {
    /// Returns the event record, if this is an event.
    pub fn as_event(&self) -> Option<&EventRecord> {
        match self {
            Self::Event(event) => Some(event),
            Self::Other { .. } => None,
        }
    }

    /// The component name (`VEVENT` for events).
    pub fn name(&self) -> &str {
        match self {
            Self::Event(_) => "VEVENT",
            Self::Other { name } => name,
        }
    }
}

/// A decoded event.
///
/// `start <= end` is not enforced: an inverted span from the feed is kept as
/// is, and [`EventRecord::duration`] reports it as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The event's UID, if the feed provides one.
    pub uid: Option<String>,
    /// The event title (`SUMMARY`).
    pub summary: Option<String>,
    /// Start time in UTC.
    pub start: DateTime<Utc>,
    /// End time in UTC, from `DTEND` or `DTSTART + DURATION`.
    pub end: Option<DateTime<Utc>>,
    /// Whether `DTSTART` was a date without a time.
    pub all_day: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
}

impl EventRecord {
    /// Creates a record with only a start time.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            uid: None,
            summary: None,
            start,
            end: None,
            all_day: false,
            description: None,
            location: None,
        }
    }

    /// Sets the UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the end time.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Marks the record as all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Length of the event. Zero when there is no end or the span is inverted.
    pub fn duration(&self) -> Duration {
        match self.end {
            Some(end) if end > self.start => end - self.start,
            _ => Duration::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn builder_sets_fields() {
        let record = EventRecord::new(utc(2025, 9, 1, 18, 0))
            .with_uid("welcome@club")
            .with_summary("Welcome Week")
            .with_end(utc(2025, 9, 1, 20, 0))
            .with_description("Come meet us")
            .with_location("Student Union");

        assert_eq!(record.uid.as_deref(), Some("welcome@club"));
        assert_eq!(record.summary.as_deref(), Some("Welcome Week"));
        assert_eq!(record.location.as_deref(), Some("Student Union"));
        assert!(!record.all_day);
        assert_eq!(record.duration(), Duration::hours(2));
    }

    #[test]
    fn inverted_span_has_zero_duration() {
        let record = EventRecord::new(utc(2025, 9, 2, 10, 0)).with_end(utc(2025, 9, 1, 10, 0));
        assert_eq!(record.end, Some(utc(2025, 9, 1, 10, 0)));
        assert_eq!(record.duration(), Duration::zero());
    }

    #[test]
    fn missing_end_has_zero_duration() {
        let record = EventRecord::new(utc(2025, 9, 2, 10, 0));
        assert_eq!(record.duration(), Duration::zero());
    }

    #[test]
    fn component_names() {
        let event = CalendarComponentRecord::Event(EventRecord::new(utc(2025, 9, 1, 0, 0)));
        let other = CalendarComponentRecord::Other {
            name: "VTIMEZONE".to_string(),
        };

        assert_eq!(event.name(), "VEVENT");
        assert!(event.as_event().is_some());
        assert_eq!(other.name(), "VTIMEZONE");
        assert!(other.as_event().is_none());
    }

    #[test]
    fn record_serialization_is_tagged() {
        let other = CalendarComponentRecord::Other {
            name: "VTODO".to_string(),
        };
        let json = serde_json::to_string(&other).unwrap();
        assert_eq!(json, r#"{"kind":"other","name":"VTODO"}"#);
    }
}
