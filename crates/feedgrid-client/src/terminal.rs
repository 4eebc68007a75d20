//! Terminal presentation adapter.
//!
//! Renders a [`Schedule`] as numbered lines (or JSON) and serves tooltips and
//! deep links for events picked by number. Numbers are 1-based positions in
//! the feed, so they stay stable whichever grid is listed.

use feedgrid_core::{
    InteractionState, NormalizedEvent, PresentationAdapter, Schedule, TimeWindow, TooltipFormatter,
};
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// A text adapter for the event pipeline.
#[derive(Debug, Clone, Default)]
pub struct TerminalAdapter {
    schedule: Schedule,
    state: InteractionState,
}

/// One row of `list --json` output.
#[derive(Debug, Serialize)]
pub struct ListedEvent<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub event: &'a NormalizedEvent,
}

impl TerminalAdapter {
    /// Creates an adapter with the given interaction state and no events.
    pub fn new(state: InteractionState) -> Self {
        Self {
            schedule: Schedule::empty(),
            state,
        }
    }

    /// The schedule last published.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The formatter dates are rendered with.
    pub fn formatter(&self) -> &TooltipFormatter {
        self.state.formatter()
    }

    /// Returns event number `index` (1-based).
    pub fn event(&self, index: usize) -> ClientResult<&NormalizedEvent> {
        index
            .checked_sub(1)
            .and_then(|i| self.schedule.events().get(i))
            .ok_or(ClientError::NoSuchEvent(index))
    }

    /// Events overlapping `window`, with their numbers.
    pub fn visible(&self, window: &TimeWindow) -> Vec<ListedEvent<'_>> {
        self.schedule
            .events()
            .iter()
            .enumerate()
            .filter(|(_, event)| window.overlaps_event(event.start, event.end))
            .map(|(i, event)| ListedEvent { index: i + 1, event })
            .collect()
    }

    /// Renders the events overlapping `window` under `heading`.
    pub fn render_list(&self, heading: &str, window: &TimeWindow) -> String {
        let formatter = self.formatter();
        let mut out = format!("{}\n", heading);

        let rows = self.visible(window);
        if rows.is_empty() {
            out.push_str("  No events\n");
        }
        for row in rows {
            out.push_str(&format!(
                "{:>4}  {}  {}",
                row.index,
                formatter.format_event_time(row.event, row.event.start),
                row.event.title
            ));
            if !row.event.location().is_empty() {
                out.push_str(&format!(" @ {}", row.event.location()));
            }
            out.push('\n');
        }

        if self.schedule.skipped() > 0 {
            out.push_str(&format!(
                "  ({} event(s) in the feed could not be read)\n",
                self.schedule.skipped()
            ));
        }
        out
    }
}

impl PresentationAdapter for TerminalAdapter {
    fn publish(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    fn interaction(&mut self) -> &mut InteractionState {
        &mut self.state
    }
}
