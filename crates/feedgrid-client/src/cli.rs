//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use feedgrid_core::GridView;

use crate::config::ClientConfig;

/// feedgrid - Club events from a calendar feed
#[derive(Debug, Parser)]
#[command(name = "feedgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FEEDGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Write logs to stderr as JSON lines
    #[arg(long)]
    pub log_json: bool,

    // --- Feed flags ---
    /// Calendar feed URL (overrides [feed].url)
    #[arg(long)]
    pub feed_url: Option<String>,

    /// Relay endpoint the feed URL is appended to
    #[arg(long, conflicts_with = "no_relay")]
    pub relay: Option<String>,

    /// Fetch the feed directly, without a relay
    #[arg(long)]
    pub no_relay: bool,

    /// Read the feed from a local .ics file instead of fetching it
    #[arg(long, conflicts_with_all = ["feed_url", "relay", "no_relay"])]
    pub file: Option<PathBuf>,

    // --- Display flags ---
    /// Display timezone (IANA name, overrides [display].timezone)
    #[arg(long)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.feed_url {
            config.feed.url = url.clone();
        }
        if let Some(ref relay) = self.relay {
            config.feed.relay = relay.clone();
        }
        if self.no_relay {
            config.feed.relay.clear();
        }
        if let Some(ref timezone) = self.timezone {
            config.display.timezone = timezone.clone();
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the events on a month or week grid (default)
    List {
        /// Grid to show
        #[arg(long, value_enum, default_value_t = ViewArg::Month)]
        view: ViewArg,

        /// A date inside the grid (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the tooltip for event N from the list
    Show {
        /// Event number as printed by `list`
        index: usize,
    },

    /// Print the "add to calendar" link for event N
    Link {
        /// Event number as printed by `list`
        index: usize,

        /// Open the link in the default browser
        #[arg(long)]
        open: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Grid layouts selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// A full month
    Month,
    /// A week starting on Sunday
    Week,
}

impl From<ViewArg> for GridView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Month => GridView::Month,
            ViewArg::Week => GridView::Week,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_with_view_and_date() {
        let cli = Cli::try_parse_from(["feedgrid", "list", "--view", "week", "--date", "2025-09-03"]).unwrap();
        match cli.command {
            Some(Command::List { view, date }) => {
                assert_eq!(view, ViewArg::Week);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_link_with_open() {
        let cli = Cli::try_parse_from(["feedgrid", "--json", "link", "2", "--open"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Command::Link { index: 2, open: true })));
        assert!(!cli.log_json);
    }

    #[test]
    fn relay_flags_conflict() {
        let result = Cli::try_parse_from(["feedgrid", "--relay", "https://relay.example.org/?", "--no-relay"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_conflicts_with_feed_url() {
        let result = Cli::try_parse_from([
            "feedgrid",
            "--file",
            "club.ics",
            "--feed-url",
            "https://example.org/club.ics",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "feedgrid",
            "--feed-url",
            "https://example.org/club.ics",
            "--no-relay",
            "--timezone",
            "America/Denver",
        ])
        .unwrap();

        let mut config = ClientConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.feed.url, "https://example.org/club.ics");
        assert_eq!(config.feed.relay(), None);
        assert_eq!(config.display.timezone, "America/Denver");
    }

    #[test]
    fn timezone_flag_keeps_all_day_events_on_their_day() {
        let cli = Cli::try_parse_from(["feedgrid", "--timezone", "America/Los_Angeles"]).unwrap();
        let mut config = ClientConfig::default();
        cli.apply_overrides(&mut config);

        let raw = feedgrid_feed::RawFeedText::new(
            "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Club Day\r\n\
             DTSTART;VALUE=DATE:20250901\r\nDTEND;VALUE=DATE:20250902\r\n\
             END:VEVENT\r\nEND:VCALENDAR\r\n",
        );
        let decoded = config.decoder().unwrap().decode(&raw).unwrap();
        let events = feedgrid_feed::project(&decoded.records);
        let tooltip = config
            .display
            .formatter()
            .unwrap()
            .tooltip(&events[0], feedgrid_core::AnchorPoint::new(0.0, 0.0));

        assert!(events[0].all_day);
        assert_eq!(tooltip.date_line, "Mon, Sep 1, 2025");
        assert_eq!(tooltip.range_line.as_deref(), Some("to Tue, Sep 2, 2025"));
    }

    #[test]
    fn view_arg_maps_to_grid_view() {
        assert_eq!(GridView::from(ViewArg::Month), GridView::Month);
        assert_eq!(GridView::from(ViewArg::Week), GridView::Week);
    }
}
