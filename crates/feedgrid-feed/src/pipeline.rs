//! Retrieve, decode and project a feed in one pass.
//!
//! [`run_pipeline`] surfaces failures to the caller. [`load_schedule`] is the
//! boundary used by presentation adapters: it logs any failure and yields an
//! empty [`Schedule`], so the calendar renders with no events rather than
//! erroring.

use feedgrid_core::{PresentationAdapter, Schedule};
use tracing::{debug, error, info};

use crate::error::FeedResult;
use crate::ics::FeedDecoder;
use crate::normalize::project;
use crate::source::FeedSource;

/// Fetches the feed from `source`, decodes it and normalizes its events.
///
/// The fetch is the only suspension point; decoding and projection run
/// synchronously once the text has arrived.
///
/// # Errors
///
/// Returns the retrieval or outer-grammar decode error, if any.
pub async fn run_pipeline(source: &dyn FeedSource, decoder: &FeedDecoder) -> FeedResult<Schedule> {
    debug!(source = source.name(), "Loading feed");
    let raw = source.fetch().await?;

    let decoded = decoder.decode(&raw).map_err(|e| e.with_source_name(source.name()))?;
    let events = project(&decoded.records);

    info!(
        source = source.name(),
        events = events.len(),
        skipped = decoded.skipped,
        "Feed loaded"
    );
    Ok(Schedule::new(events, decoded.skipped))
}

/// Loads a schedule, falling back to an empty one on any failure.
pub async fn load_schedule(source: &dyn FeedSource, decoder: &FeedDecoder) -> Schedule {
    match run_pipeline(source, decoder).await {
        Ok(schedule) => schedule,
        Err(e) => {
            error!(
                source = source.name(),
                code = %e.code(),
                error = %e,
                "Error loading events, showing an empty calendar"
            );
            Schedule::empty()
        }
    }
}

/// Loads a schedule and publishes it to `adapter` exactly once.
pub async fn load_into<A>(adapter: &mut A, source: &dyn FeedSource, decoder: &FeedDecoder)
where
    A: PresentationAdapter + ?Sized,
{
    let schedule = load_schedule(source, decoder).await;
    adapter.publish(schedule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FeedError, FeedErrorCode};
    use crate::source::{ErrorFeedSource, StaticFeedSource};
    use feedgrid_core::InteractionState;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
                        VERSION:2.0\r\n\
                        BEGIN:VEVENT\r\n\
                        UID:a@club\r\n\
                        SUMMARY:Board Games\r\n\
                        DTSTART:20250904T230000Z\r\n\
                        END:VEVENT\r\n\
                        BEGIN:VEVENT\r\n\
                        UID:b@club\r\n\
                        SUMMARY:Broken\r\n\
                        END:VEVENT\r\n\
                        END:VCALENDAR\r\n";

    #[derive(Default)]
    struct CountingAdapter {
        publishes: usize,
        last: Option<Schedule>,
        state: InteractionState,
    }

    impl PresentationAdapter for CountingAdapter {
        fn publish(&mut self, schedule: Schedule) {
            self.publishes += 1;
            self.last = Some(schedule);
        }

        fn interaction(&mut self) -> &mut InteractionState {
            &mut self.state
        }
    }

    #[tokio::test]
    async fn pipeline_projects_events_and_counts_skipped() {
        let source = StaticFeedSource::new("file", FEED);
        let schedule = run_pipeline(&source, &FeedDecoder::default()).await.unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.events()[0].title, "Board Games");
        assert_eq!(schedule.skipped(), 1);
    }

    #[tokio::test]
    async fn malformed_feed_error_names_source() {
        let source = StaticFeedSource::new("file", "BEGIN:VCALENDAR\r\n");
        let err = run_pipeline(&source, &FeedDecoder::default()).await.unwrap_err();

        assert_eq!(err.code(), FeedErrorCode::MalformedFeed);
        assert_eq!(err.source_name(), Some("file"));
    }

    #[tokio::test]
    async fn load_schedule_swallows_errors() {
        let source = ErrorFeedSource::new("http", FeedError::unavailable("relay unreachable"));
        let schedule = load_schedule(&source, &FeedDecoder::default()).await;
        assert!(schedule.is_empty());
        assert_eq!(schedule.skipped(), 0);

        let source = StaticFeedSource::new("http", "<html>502 Bad Gateway</html>");
        assert!(load_schedule(&source, &FeedDecoder::default()).await.is_empty());
    }

    #[tokio::test]
    async fn load_into_publishes_once() {
        let mut adapter = CountingAdapter::default();
        let source = StaticFeedSource::new("file", FEED);

        load_into(&mut adapter, &source, &FeedDecoder::default()).await;

        assert_eq!(adapter.publishes, 1);
        assert_eq!(adapter.last.map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn load_into_publishes_empty_schedule_on_failure() {
        let mut adapter = CountingAdapter::default();
        let source = ErrorFeedSource::new("http", FeedError::unavailable("timed out"));

        load_into(&mut adapter, &source, &FeedDecoder::default()).await;

        assert_eq!(adapter.publishes, 1);
        assert!(adapter.last.unwrap().is_empty());
    }
}
