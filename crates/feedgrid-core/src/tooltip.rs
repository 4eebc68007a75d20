//! Tooltip derivation for hovered events.
//!
//! [`TooltipFormatter`] turns a [`NormalizedEvent`] and a screen anchor into
//! a [`TooltipPayload`]. Dates are rendered in a display timezone and locale;
//! all-day events, and any instant at exactly local midnight, are shown as a
//! date without a time of day.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use feedgrid_core::{AnchorPoint, NormalizedEvent, TooltipFormatter};
//!
//! let event = NormalizedEvent::new("Welcome Week", Utc.with_ymd_and_hms(2025, 9, 1, 18, 0, 0).unwrap());
//! let tooltip = TooltipFormatter::default().tooltip(&event, AnchorPoint::new(100.0, 50.0));
//! assert_eq!(tooltip.date_line, "Mon, Sep 1, 2025, 6:00 PM");
//! ```

use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;

use crate::event::{AnchorPoint, NormalizedEvent, TooltipPayload};
use crate::time::{is_local_midnight, same_local_day};

const DATE_FORMAT: &str = "%a, %b %-d, %Y";
const DATE_TIME_FORMAT: &str = "%a, %b %-d, %Y, %-I:%M %p";

/// Parses a POSIX locale name such as `en_US` or `de_DE`.
pub fn parse_locale(name: &str) -> Option<Locale> {
    Locale::try_from(name).ok()
}

/// Builds tooltip payloads in a fixed display timezone and locale.
#[derive(Debug, Clone, Copy)]
pub struct TooltipFormatter {
    zone: Tz,
    locale: Locale,
}

impl Default for TooltipFormatter {
    fn default() -> Self {
        Self {
            zone: Tz::UTC,
            locale: Locale::en_US,
        }
    }
}

impl TooltipFormatter {
    /// Creates a formatter for the given display zone and locale.
    pub fn new(zone: Tz, locale: Locale) -> Self {
        Self { zone, locale }
    }

    /// Builder method to set the display zone.
    pub fn with_zone(mut self, zone: Tz) -> Self {
        self.zone = zone;
        self
    }

    /// Builder method to set the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The display zone.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Formats one instant, omitting the time at local midnight.
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        let pattern = if is_local_midnight(instant, &self.zone) {
            DATE_FORMAT
        } else {
            DATE_TIME_FORMAT
        };
        instant
            .with_timezone(&self.zone)
            .format_localized(pattern, self.locale)
            .to_string()
    }

    /// Formats the calendar date of `instant` in the display zone.
    pub fn format_date(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.zone)
            .format_localized(DATE_FORMAT, self.locale)
            .to_string()
    }

    /// Formats an event boundary. All-day events never show a time of day.
    pub fn format_event_time(&self, event: &NormalizedEvent, instant: DateTime<Utc>) -> String {
        if event.all_day {
            self.format_date(instant)
        } else {
            self.format_instant(instant)
        }
    }

    /// Derives the tooltip for `event` anchored at `anchor`.
    pub fn tooltip(&self, event: &NormalizedEvent, anchor: AnchorPoint) -> TooltipPayload {
        let range_line = event
            .end
            .filter(|end| !same_local_day(event.start, *end, &self.zone))
            .map(|end| format!("to {}", self.format_event_time(event, end)));

        TooltipPayload {
            title: event.title.clone(),
            date_line: self.format_event_time(event, event.start),
            range_line,
            location: non_empty(event.location()),
            description: non_empty(event.description()),
            anchor,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn anchor() -> AnchorPoint {
        AnchorPoint::new(100.0, 50.0)
    }

    fn welcome_week() -> NormalizedEvent {
        NormalizedEvent::new("Welcome Week", utc(2025, 9, 1, 18, 0, 0))
            .with_end(utc(2025, 9, 1, 20, 0, 0))
            .with_location("Union Plaza")
    }

    #[test]
    fn same_day_event_has_single_date_line() {
        let tooltip = TooltipFormatter::default().tooltip(&welcome_week(), anchor());

        assert_eq!(tooltip.title, "Welcome Week");
        assert_eq!(tooltip.date_line, "Mon, Sep 1, 2025, 6:00 PM");
        assert!(tooltip.range_line.is_none());
        assert_eq!(tooltip.location.as_deref(), Some("Union Plaza"));
        assert!(tooltip.description.is_none());
        assert_eq!(tooltip.anchor, anchor());
    }

    #[test]
    fn midnight_start_omits_time() {
        let event = NormalizedEvent::new("Club Fair", utc(2025, 9, 5, 0, 0, 0))
            .with_end(utc(2025, 9, 6, 0, 0, 0))
            .with_all_day(true);
        let tooltip = TooltipFormatter::default().tooltip(&event, anchor());

        assert_eq!(tooltip.date_line, "Fri, Sep 5, 2025");
        assert_eq!(tooltip.range_line.as_deref(), Some("to Sat, Sep 6, 2025"));
    }

    #[test]
    fn all_day_event_off_midnight_omits_time() {
        // Midnight fell in a DST gap, so the start is 01:00 local
        let zone = chrono_tz::America::Santiago;
        let event = NormalizedEvent::new("Fiestas Patrias Social", utc(2025, 9, 7, 4, 0, 0))
            .with_end(utc(2025, 9, 8, 3, 0, 0))
            .with_all_day(true);
        let tooltip = TooltipFormatter::default().with_zone(zone).tooltip(&event, anchor());

        assert_eq!(tooltip.date_line, "Sun, Sep 7, 2025");
        assert_eq!(tooltip.range_line.as_deref(), Some("to Mon, Sep 8, 2025"));
    }

    #[test]
    fn multi_day_event_has_range_line_with_time() {
        let event = NormalizedEvent::new("Retreat", utc(2025, 10, 10, 17, 30, 0))
            .with_end(utc(2025, 10, 12, 11, 0, 0));
        let tooltip = TooltipFormatter::default().tooltip(&event, anchor());

        assert_eq!(tooltip.date_line, "Fri, Oct 10, 2025, 5:30 PM");
        assert_eq!(
            tooltip.range_line.as_deref(),
            Some("to Sun, Oct 12, 2025, 11:00 AM")
        );
    }

    #[test]
    fn missing_end_has_no_range_line() {
        let event = NormalizedEvent::new("Open Mic", utc(2025, 9, 3, 19, 0, 0));
        let tooltip = TooltipFormatter::default().tooltip(&event, anchor());
        assert!(tooltip.range_line.is_none());
    }

    #[test]
    fn day_boundaries_follow_display_zone() {
        // 23:00-01:00 UTC spans two days in UTC, one day in New York
        let event = NormalizedEvent::new("Late Show", utc(2025, 9, 1, 23, 0, 0))
            .with_end(utc(2025, 9, 2, 1, 0, 0));

        let in_utc = TooltipFormatter::default().tooltip(&event, anchor());
        assert!(in_utc.range_line.is_some());

        let in_new_york = TooltipFormatter::default()
            .with_zone(chrono_tz::America::New_York)
            .tooltip(&event, anchor());
        assert!(in_new_york.range_line.is_none());
        assert_eq!(in_new_york.date_line, "Mon, Sep 1, 2025, 7:00 PM");
    }

    #[test]
    fn long_description_is_not_truncated() {
        let description = "x".repeat(2_000);
        let event = welcome_week().with_description(description.clone());
        let tooltip = TooltipFormatter::default().tooltip(&event, anchor());
        assert_eq!(tooltip.description, Some(description));
    }

    #[test]
    fn rendered_lines() {
        let event = welcome_week().with_description("Meet every club on campus.");
        let tooltip = TooltipFormatter::default().tooltip(&event, anchor());
        insta::assert_snapshot!(tooltip.lines().join("\n"), @r"
        Welcome Week
        Mon, Sep 1, 2025, 6:00 PM
        Location: Union Plaza
        Meet every club on campus.
        ");
    }

    #[test]
    fn parses_known_locale() {
        assert!(parse_locale("en_US").is_some());
        assert!(parse_locale("not_A_locale").is_none());
    }
}
