//! `link`: the "add to calendar" link for one event.

use feedgrid_core::PresentationAdapter;
use serde_json::json;

use crate::actions;
use crate::error::ClientResult;
use crate::terminal::TerminalAdapter;

/// Prints, and optionally opens, the deep link for event number `index`.
pub fn run(adapter: &mut TerminalAdapter, index: usize, open: bool, json: bool) -> ClientResult<()> {
    let event = adapter.event(index)?.clone();
    let link = adapter.on_event_activate(&event);

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "index": index, "link": link }))?);
    } else {
        println!("{}", link);
    }

    if open {
        actions::open_link(&link)?;
    }
    Ok(())
}
