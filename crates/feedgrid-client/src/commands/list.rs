//! `list`: events on a month or week grid.

use chrono::{NaiveDate, Utc};
use feedgrid_core::{GridView, TimeWindow};

use crate::error::ClientResult;
use crate::terminal::TerminalAdapter;

/// Prints the events overlapping the grid that contains `date` (today in
/// the display zone when `None`).
pub fn run(adapter: &TerminalAdapter, view: GridView, date: Option<NaiveDate>, json: bool) -> ClientResult<()> {
    let formatter = adapter.formatter();
    let zone = formatter.zone();
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&zone).date_naive());
    let window = TimeWindow::for_grid(view, date, &zone);

    if json {
        println!("{}", serde_json::to_string_pretty(&adapter.visible(&window))?);
    } else {
        let heading = heading(view, &formatter.format_date(window.start));
        print!("{}", adapter.render_list(&heading, &window));
    }
    Ok(())
}

fn heading(view: GridView, first_day: &str) -> String {
    match view {
        GridView::Month => format!("Month starting {}", first_day),
        GridView::Week => format!("Week starting {}", first_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings() {
        assert_eq!(heading(GridView::Month, "Mon, Sep 1, 2025"), "Month starting Mon, Sep 1, 2025");
        assert_eq!(heading(GridView::Week, "Sun, Aug 31, 2025"), "Week starting Sun, Aug 31, 2025");
    }
}
