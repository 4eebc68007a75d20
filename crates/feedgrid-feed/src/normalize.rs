//! EventRecord to NormalizedEvent conversion.
//!
//! Normalization is one-to-one and order-preserving: every event record in the
//! input produces exactly one [`NormalizedEvent`], at the same relative
//! position. Non-event records are dropped.

use feedgrid_core::NormalizedEvent;

use crate::record::{CalendarComponentRecord, EventRecord};

/// Converts an [`EventRecord`] to a [`NormalizedEvent`].
///
/// Missing summary, description and location become empty strings. A missing
/// end stays `None`; it is never defaulted to the start.
pub fn normalize_event(record: &EventRecord) -> NormalizedEvent {
    let mut event = NormalizedEvent::new(record.summary.clone().unwrap_or_default(), record.start)
        .with_all_day(record.all_day);

    if let Some(end) = record.end {
        event = event.with_end(end);
    }

    if let Some(ref description) = record.description {
        event = event.with_description(description);
    }

    if let Some(ref location) = record.location {
        event = event.with_location(location);
    }

    event
}

/// Projects decoded records onto normalized events.
pub fn project(records: &[CalendarComponentRecord]) -> Vec<NormalizedEvent> {
    records
        .iter()
        .filter_map(CalendarComponentRecord::as_event)
        .map(normalize_event)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn full_record_round_trips() {
        let record = EventRecord::new(utc(2025, 9, 1, 18, 0))
            .with_uid("welcome@club")
            .with_summary("Welcome Week")
            .with_end(utc(2025, 9, 1, 20, 0))
            .with_description("Come meet us")
            .with_location("Student Union");

        let event = normalize_event(&record);

        assert_eq!(event.title, "Welcome Week");
        assert_eq!(event.start, record.start);
        assert_eq!(event.end, record.end);
        assert_eq!(event.description(), "Come meet us");
        assert_eq!(event.location(), "Student Union");
        assert!(!event.all_day);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let event = normalize_event(&EventRecord::new(utc(2025, 9, 1, 18, 0)));

        assert_eq!(event.title, "");
        assert_eq!(event.end, None);
        assert_eq!(event.description(), "");
        assert_eq!(event.location(), "");
    }

    #[test]
    fn all_day_flag_is_carried() {
        let record = EventRecord::new(utc(2025, 9, 10, 0, 0)).with_all_day(true);
        assert!(normalize_event(&record).all_day);
    }

    #[test]
    fn project_preserves_order_and_drops_other_records() {
        let records = vec![
            CalendarComponentRecord::Other {
                name: "VTIMEZONE".to_string(),
            },
            CalendarComponentRecord::Event(EventRecord::new(utc(2025, 9, 3, 18, 0)).with_summary("C")),
            CalendarComponentRecord::Event(EventRecord::new(utc(2025, 9, 1, 18, 0)).with_summary("A")),
            CalendarComponentRecord::Other {
                name: "VALARM".to_string(),
            },
            CalendarComponentRecord::Event(EventRecord::new(utc(2025, 9, 2, 18, 0)).with_summary("B")),
        ];

        let titles: Vec<_> = project(&records).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn project_empty() {
        assert!(project(&[]).is_empty());
    }
}
