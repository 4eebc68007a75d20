//! Time helpers for calendar events.
//!
//! This module provides local-time resolution helpers shared by the decoder
//! and the tooltip formatter, and [`TimeWindow`] / [`GridView`] for selecting
//! the events visible on a month or week grid.

use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

/// Resolves a wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous local times (DST fall-back) resolve to the earliest instant.
/// Non-existent local times (DST spring-forward gap) are read with the offset
/// in force before the gap, which moves them forward by the gap's length:
/// 02:30 on a New York spring-forward day becomes 03:30 EDT.
pub fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }

    naive
        .checked_sub_signed(Duration::days(1))
        .and_then(|before| tz.offset_from_local_datetime(&before).earliest())
        .and_then(|offset| {
            naive.checked_sub_signed(Duration::seconds(i64::from(offset.fix().local_minus_utc())))
        })
        .map(|utc| Utc.from_utc_datetime(&utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Returns the instant of midnight at the start of `date` in `tz`.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(NaiveTime::MIN), tz)
}

/// Returns true if `instant` falls exactly on midnight in `tz`.
///
/// Used as the all-day indicator when rendering dates.
pub fn is_local_midnight<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> bool {
    instant.with_timezone(tz).time() == NaiveTime::MIN
}

/// Returns true if both instants fall on the same calendar day in `tz`.
pub fn same_local_day<Tz: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, tz: &Tz) -> bool {
    a.with_timezone(tz).date_naive() == b.with_timezone(tz).date_naive()
}

/// The grid layout a presentation adapter is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridView {
    /// A full month, first day to last day.
    #[default]
    Month,
    /// A single week starting on Sunday.
    Week,
}

impl GridView {
    /// Returns the grid name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
        }
    }
}

/// A time window for selecting calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// An inverted pair is swapped so the window is never negative.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a window spanning the local dates `[first, last_exclusive)` in `tz`.
    pub fn for_dates<Tz: TimeZone>(first: NaiveDate, last_exclusive: NaiveDate, tz: &Tz) -> Self {
        Self::new(local_midnight(first, tz), local_midnight(last_exclusive, tz))
    }

    /// Creates the window shown by `view` for a grid containing `date`.
    pub fn for_grid<Tz: TimeZone>(view: GridView, date: NaiveDate, tz: &Tz) -> Self {
        match view {
            GridView::Month => {
                let first = date.with_day(1).unwrap_or(date);
                let next = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                Self::for_dates(first, next, tz)
            }
            GridView::Week => {
                let offset = i64::from(date.weekday().num_days_from_sunday());
                let first = date
                    .checked_sub_signed(Duration::days(offset))
                    .unwrap_or(NaiveDate::MIN);
                let next = first
                    .checked_add_signed(Duration::days(7))
                    .unwrap_or(NaiveDate::MAX);
                Self::for_dates(first, next, tz)
            }
        }
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if an event with the given start and optional end overlaps this window.
    ///
    /// An event without an end is treated as an instant at its start.
    pub fn overlaps_event(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> bool {
        match end {
            Some(end) if end > start => start < self.end && end > self.start,
            _ => self.contains(start),
        }
    }
}
