//! `show`: the tooltip for one event.

use feedgrid_core::{AnchorGeometry, PresentationAdapter};

use crate::error::ClientResult;
use crate::terminal::TerminalAdapter;

/// Prints the tooltip for event number `index`.
pub fn run(adapter: &mut TerminalAdapter, index: usize, json: bool) -> ClientResult<()> {
    let event = adapter.event(index)?.clone();

    // A terminal has no element geometry; the anchor is the origin
    let tooltip = adapter.on_event_hover_enter(&event, AnchorGeometry::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&tooltip)?);
    } else {
        for line in tooltip.lines() {
            println!("{}", line);
        }
    }

    adapter.on_event_hover_leave();
    Ok(())
}
