//! Event types for the rendering layer.
//!
//! This module provides the types a presentation adapter consumes:
//! - [`NormalizedEvent`]: the rendering-ready event with its
//!   [`ExtendedProperties`] bag
//! - [`Schedule`]: the immutable event set published once per load
//! - [`AnchorPoint`] / [`AnchorGeometry`]: screen-space positions for tooltips
//! - [`TooltipPayload`]: the derived hover data
//! - [`CalendarDeepLink`]: the derived "add to calendar" URI

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Free-text fields carried alongside an event for display purposes.
///
/// Absent values are stored as empty strings so adapters never see a
/// missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    /// The event description, or `""`.
    pub description: String,
    /// The event location, or `""`.
    pub location: String,
}

/// A calendar event ready for rendering.
///
/// This is the canonical representation handed to a presentation adapter
/// after a feed has been decoded. It is adapter-agnostic and serializes to
/// the camelCase shape web calendar widgets expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    /// The event title, `""` when the feed has no summary.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends. `None` when the feed gives no end.
    pub end: Option<DateTime<Utc>>,
    /// Whether the feed declared a date-only (all-day) start.
    #[serde(default)]
    pub all_day: bool,
    /// Description and location.
    #[serde(rename = "extendedProps")]
    pub extended_properties: ExtendedProperties,
}

impl NormalizedEvent {
    /// Creates a new event with a title and start, no end and empty properties.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end: None,
            all_day: false,
            extended_properties: ExtendedProperties::default(),
        }
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.extended_properties.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.extended_properties.location = location.into();
        self
    }

    /// Returns the description, `""` when absent.
    pub fn description(&self) -> &str {
        &self.extended_properties.description
    }

    /// Returns the location, `""` when absent.
    pub fn location(&self) -> &str {
        &self.extended_properties.location
    }

    /// Returns the duration of the event.
    ///
    /// Events without an end, and events whose end precedes their start,
    /// have a zero duration.
    pub fn duration(&self) -> Duration {
        match self.end {
            Some(end) if end > self.start => end - self.start,
            _ => Duration::zero(),
        }
    }
}

/// The normalized event set produced by one load.
///
/// A schedule is built once and never updated in place; a reload replaces
/// it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    events: Vec<NormalizedEvent>,
    skipped: usize,
}

impl Schedule {
    /// Creates a schedule from normalized events and the number of feed
    /// records that were dropped while decoding.
    pub fn new(events: Vec<NormalizedEvent>, skipped: usize) -> Self {
        Self { events, skipped }
    }

    /// An empty schedule, used when the feed could not be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The events in feed order.
    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    /// Number of malformed event records skipped while decoding.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consumes the schedule, returning its events.
    pub fn into_events(self) -> Vec<NormalizedEvent> {
        self.events
    }
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The bounding box of the element an event is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorGeometry {
    /// Gap between the element's top edge and the tooltip anchor.
    pub const TOOLTIP_OFFSET: f64 = 10.0;

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The tooltip anchor: horizontally centred, just above the element.
    pub fn tooltip_anchor(&self) -> AnchorPoint {
        AnchorPoint::new(self.left + self.width / 2.0, self.top - Self::TOOLTIP_OFFSET)
    }
}

/// Hover data for a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    /// The event title.
    pub title: String,
    /// The formatted start date (and time, unless it is local midnight).
    pub date_line: String,
    /// `"to <end>"`, present only when the event ends on a later day.
    pub range_line: Option<String>,
    /// The location, present only when non-empty.
    pub location: Option<String>,
    /// The description, present only when non-empty.
    pub description: Option<String>,
    /// Where the tooltip is anchored on screen.
    pub anchor: AnchorPoint,
}

impl TooltipPayload {
    /// Renders the payload as display lines for text-based adapters.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), self.date_line.clone()];
        if let Some(ref range) = self.range_line {
            lines.push(range.clone());
        }
        if let Some(ref location) = self.location {
            lines.push(format!("Location: {}", location));
        }
        if let Some(ref description) = self.description {
            lines.push(description.clone());
        }
        lines
    }
}

/// An "add to calendar" URI built from one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDeepLink(String);

impl CalendarDeepLink {
    pub(crate) fn new(uri: String) -> Self {
        Self(uri)
    }

    /// The link as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the link, returning the URI string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CalendarDeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CalendarDeepLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod normalized_event {
        use super::*;

        fn sample_event() -> NormalizedEvent {
            NormalizedEvent::new("Welcome Week", utc(2025, 9, 1, 18, 0, 0))
                .with_end(utc(2025, 9, 1, 20, 0, 0))
                .with_location("Union Plaza")
        }

        #[test]
        fn defaults_are_empty_text() {
            let event = NormalizedEvent::new("", utc(2025, 9, 1, 18, 0, 0));
            assert_eq!(event.title, "");
            assert_eq!(event.description(), "");
            assert_eq!(event.location(), "");
            assert!(event.end.is_none());
            assert!(!event.all_day);
        }

        #[test]
        fn builder_pattern() {
            let event = sample_event().with_description("Meet the clubs").with_all_day(true);
            assert_eq!(event.location(), "Union Plaza");
            assert_eq!(event.description(), "Meet the clubs");
            assert!(event.all_day);
        }

        #[test]
        fn duration() {
            assert_eq!(sample_event().duration(), Duration::hours(2));
            assert_eq!(
                NormalizedEvent::new("x", utc(2025, 9, 1, 18, 0, 0)).duration(),
                Duration::zero()
            );
        }

        #[test]
        fn inverted_span_has_zero_duration() {
            let event = NormalizedEvent::new("x", utc(2025, 9, 1, 18, 0, 0))
                .with_end(utc(2025, 9, 1, 17, 0, 0));
            assert_eq!(event.duration(), Duration::zero());
        }

        #[test]
        fn serializes_with_extended_props() {
            let json = serde_json::to_value(sample_event()).unwrap();
            assert_eq!(json["title"], "Welcome Week");
            assert_eq!(json["start"], "2025-09-01T18:00:00Z");
            assert_eq!(json["allDay"], false);
            assert_eq!(json["extendedProps"]["location"], "Union Plaza");
            assert_eq!(json["extendedProps"]["description"], "");
        }

        #[test]
        fn serde_roundtrip_without_end() {
            let event = NormalizedEvent::new("Open Mic", utc(2025, 9, 3, 19, 0, 0));
            let json = serde_json::to_string(&event).unwrap();
            assert!(json.contains("\"end\":null"));
            let parsed: NormalizedEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, parsed);
        }
    }

    mod schedule {
        use super::*;

        #[test]
        fn empty_schedule() {
            let schedule = Schedule::empty();
            assert!(schedule.is_empty());
            assert_eq!(schedule.len(), 0);
            assert_eq!(schedule.skipped(), 0);
        }

        #[test]
        fn keeps_order_and_skip_count() {
            let events = vec![
                NormalizedEvent::new("B", utc(2025, 9, 2, 0, 0, 0)),
                NormalizedEvent::new("A", utc(2025, 9, 1, 0, 0, 0)),
            ];
            let schedule = Schedule::new(events, 3);
            let titles: Vec<_> = schedule.events().iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, ["B", "A"]);
            assert_eq!(schedule.skipped(), 3);
            assert_eq!(schedule.into_events().len(), 2);
        }
    }

    mod anchor {
        use super::*;

        #[test]
        fn tooltip_anchor_is_centered_above() {
            let geometry = AnchorGeometry::new(80.0, 60.0, 40.0, 20.0);
            assert_eq!(geometry.tooltip_anchor(), AnchorPoint::new(100.0, 50.0));
        }
    }

    mod tooltip_payload {
        use super::*;

        #[test]
        fn lines_skip_absent_parts() {
            let payload = TooltipPayload {
                title: "Welcome Week".to_string(),
                date_line: "Mon, Sep 1, 2025, 6:00 PM".to_string(),
                range_line: None,
                location: Some("Union Plaza".to_string()),
                description: None,
                anchor: AnchorPoint::new(100.0, 50.0),
            };
            assert_eq!(
                payload.lines(),
                [
                    "Welcome Week",
                    "Mon, Sep 1, 2025, 6:00 PM",
                    "Location: Union Plaza"
                ]
            );
        }
    }

    mod deep_link {
        use super::*;

        #[test]
        fn display_and_serde() {
            let link = CalendarDeepLink::new("https://example.com/?a=1".to_string());
            assert_eq!(link.to_string(), "https://example.com/?a=1");
            assert_eq!(
                serde_json::to_string(&link).unwrap(),
                "\"https://example.com/?a=1\""
            );
        }
    }
}
