//! iCalendar feed decoding.
//!
//! This module parses iCalendar (RFC 5545) text into [`CalendarComponentRecord`]s.
//!
//! Decoding happens in two layers:
//!
//! 1. The outer grammar: content lines are unfolded, BEGIN/END blocks must
//!    balance, and the text must parse into a component tree. Any failure
//!    here rejects the whole feed as [`FeedErrorCode::MalformedFeed`].
//! 2. Individual events: an event whose times cannot be resolved is skipped
//!    and counted in [`DecodedFeed::skipped`]; the rest of the feed survives.
//!
//! [`FeedErrorCode::MalformedFeed`]: crate::error::FeedErrorCode::MalformedFeed

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use feedgrid_core::{local_midnight, resolve_local};
use icalendar::parser::{Component, Property, read_calendar, unfold};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{FeedError, FeedResult};
use crate::record::{CalendarComponentRecord, EventRecord};
use crate::source::RawFeedText;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])?P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration regex should be valid")
});

/// The result of decoding one feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFeed {
    /// Decoded components in document order.
    pub records: Vec<CalendarComponentRecord>,
    /// Number of events dropped because their times could not be resolved.
    pub skipped: usize,
}

impl DecodedFeed {
    /// Iterates over the event records, in document order.
    pub fn events(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter_map(CalendarComponentRecord::as_event)
    }

    /// Number of event records.
    pub fn event_count(&self) -> usize {
        self.events().count()
    }
}

/// Why a single event was dropped.
#[derive(Debug, Error)]
enum EventSkip {
    #[error("missing DTSTART")]
    MissingStart,
    #[error("unparsable DTSTART '{0}'")]
    InvalidStart(String),
    #[error("unparsable DTEND '{0}'")]
    InvalidEnd(String),
    #[error("unparsable DURATION '{0}'")]
    InvalidDuration(String),
}

/// Decodes iCalendar text into component records.
///
/// Times without an explicit zone (floating times and dates) are resolved in
/// the decoder's default zone, UTC unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedDecoder {
    default_zone: Tz,
}

impl Default for FeedDecoder {
    fn default() -> Self {
        Self {
            default_zone: Tz::UTC,
        }
    }
}

impl FeedDecoder {
    /// Creates a decoder resolving zone-less times in `default_zone`.
    pub fn new(default_zone: Tz) -> Self {
        Self { default_zone }
    }

    /// The zone used for floating times, dates and unknown TZIDs.
    pub fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// Decodes a feed.
    ///
    /// An empty body decodes to zero records.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedFeed`](crate::error::FeedErrorCode::MalformedFeed)
    /// error if the text is not valid at the outer grammar level.
    pub fn decode(&self, raw: &RawFeedText) -> FeedResult<DecodedFeed> {
        let text = raw.as_str().trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            debug!("Feed body is empty");
            return Ok(DecodedFeed::default());
        }

        let unfolded = unfold(text);
        let lines = content_lines(&unfolded);
        check_structure(&lines)?;

        let normalized = lines.iter().fold(String::new(), |mut acc, line| {
            match block_delimiter(line) {
                Some((keyword, block)) => {
                    acc.push_str(keyword);
                    acc.push(':');
                    acc.push_str(&block);
                }
                None => acc.push_str(&untyped_property(line)),
            }
            acc.push_str("\r\n");
            acc
        });
        let calendar = read_calendar(&normalized)
            .map_err(|e| FeedError::malformed(format!("Failed to parse feed: {:?}", e)))?;

        let mut decoded = DecodedFeed::default();
        for component in &calendar.components {
            self.collect(component, &mut decoded);
        }

        debug!(
            records = decoded.records.len(),
            events = decoded.event_count(),
            skipped = decoded.skipped,
            "Decoded feed"
        );
        Ok(decoded)
    }

    /// Walks a component and its children in document order.
    fn collect(&self, component: &Component<'_>, decoded: &mut DecodedFeed) {
        let name = component.name.as_ref().to_ascii_uppercase();
        match name.as_str() {
            "VCALENDAR" => {}
            "VEVENT" => match self.decode_event(component) {
                Ok(event) => decoded.records.push(CalendarComponentRecord::Event(event)),
                Err(reason) => {
                    let uid = find_property(component, "UID").map(|p| unescape_text(p.val.as_ref()));
                    warn!(
                        uid = uid.as_deref().unwrap_or("<none>"),
                        reason = %reason,
                        "Skipping event"
                    );
                    decoded.skipped += 1;
                }
            },
            _ => decoded.records.push(CalendarComponentRecord::Other { name }),
        }

        for child in &component.components {
            self.collect(child, decoded);
        }
    }

    /// Decodes a single VEVENT.
    fn decode_event(&self, component: &Component<'_>) -> Result<EventRecord, EventSkip> {
        let dtstart = find_property(component, "DTSTART").ok_or(EventSkip::MissingStart)?;
        let (start, all_day) = self
            .parse_date_time(dtstart)
            .ok_or_else(|| EventSkip::InvalidStart(dtstart.val.to_string()))?;

        let end = match find_property(component, "DTEND") {
            Some(dtend) => {
                let (end, _) = self
                    .parse_date_time(dtend)
                    .ok_or_else(|| EventSkip::InvalidEnd(dtend.val.to_string()))?;
                Some(end)
            }
            None => match find_property(component, "DURATION") {
                Some(duration) => {
                    let value = duration.val.as_ref();
                    let end = parse_duration(value)
                        .and_then(|d| start.checked_add_signed(d))
                        .ok_or_else(|| EventSkip::InvalidDuration(value.to_string()))?;
                    Some(end)
                }
                None => None,
            },
        };

        let text = |name: &str| find_property(component, name).map(|p| unescape_text(p.val.as_ref()));

        let record = EventRecord {
            uid: text("UID"),
            summary: text("SUMMARY"),
            start,
            end,
            all_day,
            description: text("DESCRIPTION"),
            location: text("LOCATION"),
        };

        debug!(
            uid = ?record.uid,
            summary = ?record.summary,
            start = %record.start,
            "Decoded event"
        );
        Ok(record)
    }

    /// Resolves a DTSTART/DTEND property to UTC.
    ///
    /// Returns the instant and whether the value was a date without a time.
    fn parse_date_time(&self, property: &Property<'_>) -> Option<(DateTime<Utc>, bool)> {
        let value = property.val.as_ref().trim();

        // Date only (YYYYMMDD): midnight in the stated zone
        if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
            let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
            return Some((local_midnight(date, &self.property_zone(property)), true));
        }

        // UTC, any TZID is ignored
        if let Some(utc) = value.strip_suffix(['Z', 'z']) {
            let naive = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S").ok()?;
            return Some((Utc.from_utc_datetime(&naive), false));
        }

        let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
        Some((resolve_local(naive, &self.property_zone(property)), false))
    }

    /// The zone named by the property's TZID parameter, or the default zone.
    fn property_zone(&self, property: &Property<'_>) -> Tz {
        let Some(tzid) = find_parameter(property, "TZID") else {
            return self.default_zone;
        };

        let tzid = tzid.trim_matches('"');
        match Tz::from_str(tzid) {
            Ok(tz) => tz,
            Err(_) => {
                warn!(tzid = %tzid, fallback = %self.default_zone, "Unknown TZID, using default zone");
                self.default_zone
            }
        }
    }
}

/// Parses an RFC 5545 DURATION value (`P1W`, `PT1H30M`, `-P1D`, ...).
pub fn parse_duration(value: &str) -> Option<Duration> {
    let caps = DURATION_PATTERN.captures(value.trim())?;

    let part = |index: usize| -> Option<Option<i64>> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<i64>().ok().map(Some),
            None => Some(None),
        }
    };
    let (weeks, days, hours, minutes, seconds) = (part(2)?, part(3)?, part(4)?, part(5)?, part(6)?);

    if [weeks, days, hours, minutes, seconds].iter().all(Option::is_none) {
        return None;
    }

    let total = [
        weeks.map(Duration::try_weeks),
        days.map(Duration::try_days),
        hours.map(Duration::try_hours),
        minutes.map(Duration::try_minutes),
        seconds.map(Duration::try_seconds),
    ]
    .into_iter()
    .flatten()
    .try_fold(Duration::zero(), |acc, d| acc.checked_add(&d?))?;

    match caps.get(1).map(|m| m.as_str()) {
        Some("-") => Some(-total),
        _ => Some(total),
    }
}

/// Unescapes an iCalendar TEXT value.
///
/// Escapes are resolved in a single left-to-right pass, so `\\n` yields a
/// backslash followed by `n`.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Splits unfolded text into non-blank content lines.
fn content_lines(unfolded: &str) -> Vec<&str> {
    unfolded
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Lower-cases the property name and parameter names of a content line.
///
/// The parser unescapes a value only when it can type it from an upper-case
/// property name or a `VALUE` parameter, and its unescaping is applied in
/// several passes. Values reach [`unescape_text`] raw instead.
fn untyped_property(line: &str) -> String {
    let (head, value) = line.split_at(value_separator(line).unwrap_or(line.len()));

    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    let mut in_key = true;
    for c in head.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => in_key = true,
            '=' if !in_quotes => in_key = false,
            _ => {}
        }
        out.push(if in_key { c.to_ascii_lowercase() } else { c });
    }
    out.push_str(value);
    out
}

/// Byte offset of the ':' separating a content line's name from its value.
fn value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    line.char_indices().find_map(|(i, c)| match c {
        '"' => {
            in_quotes = !in_quotes;
            None
        }
        ':' if !in_quotes => Some(i),
        _ => None,
    })
}

/// Returns `("BEGIN" | "END", BLOCK)` for a block delimiter line, upper-cased.
fn block_delimiter(line: &str) -> Option<(&'static str, String)> {
    let (name, value) = line.split_once(':')?;
    let block = value.trim().to_ascii_uppercase();
    match name.trim() {
        n if n.eq_ignore_ascii_case("BEGIN") => Some(("BEGIN", block)),
        n if n.eq_ignore_ascii_case("END") => Some(("END", block)),
        _ => None,
    }
}

/// Checks that BEGIN/END blocks balance and every line is a content line.
fn check_structure(lines: &[&str]) -> FeedResult<()> {
    let mut open: Vec<String> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_no = index + 1;
        let Some((head, _)) = line.split_once(':') else {
            return Err(FeedError::malformed(format!(
                "content line {} has no ':' separator",
                line_no
            )));
        };

        match block_delimiter(line) {
            Some(("BEGIN", block)) => open.push(block),
            Some((_, value)) => match open.pop() {
                Some(block) if block == value => {}
                Some(block) => {
                    return Err(FeedError::malformed(format!(
                        "content line {}: END:{} closes BEGIN:{}",
                        line_no, value, block
                    )));
                }
                None => {
                    return Err(FeedError::malformed(format!(
                        "content line {}: END:{} without matching BEGIN",
                        line_no, value
                    )));
                }
            },
            None if open.is_empty() => {
                let name = head.split(';').next().unwrap_or(head).trim();
                return Err(FeedError::malformed(format!(
                    "content line {}: property {} outside of any component",
                    line_no, name
                )));
            }
            None => {}
        }
    }

    match open.last() {
        Some(block) => Err(FeedError::malformed(format!("unterminated {} block", block))),
        None => Ok(()),
    }
}

fn find_property<'c, 'a>(component: &'c Component<'a>, name: &str) -> Option<&'c Property<'a>> {
    component
        .properties
        .iter()
        .find(|p| p.name.as_ref().eq_ignore_ascii_case(name))
}

fn find_parameter<'p>(property: &'p Property<'_>, key: &str) -> Option<&'p str> {
    property
        .params
        .iter()
        .find(|p| p.key.as_ref().eq_ignore_ascii_case(key))
        .and_then(|p| p.val.as_ref().map(|v| v.as_ref()))
}
