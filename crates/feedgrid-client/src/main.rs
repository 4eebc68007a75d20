//! feedgrid CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use feedgrid_core::{TracingConfig, TracingOutputFormat, init_tracing};
use feedgrid_feed::load_into;

use feedgrid_client::cli::{Cli, Command, ConfigAction, ViewArg};
use feedgrid_client::commands;
use feedgrid_client::config::ClientConfig;
use feedgrid_client::error::{ClientError, ClientResult};
use feedgrid_client::source::build_source;
use feedgrid_client::terminal::TerminalAdapter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let mut tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if cli.log_json {
        tracing_config = tracing_config.with_format(TracingOutputFormat::Json);
    }
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };
    cli.apply_overrides(&mut config);

    let command = match cli.command {
        Some(Command::Config { action }) => {
            return match action {
                ConfigAction::Dump => commands::config::dump(&config),
                ConfigAction::Validate => commands::config::validate(&config),
                ConfigAction::Path => commands::config::path(),
            };
        }
        Some(command) => command,
        None => Command::List {
            view: ViewArg::Month,
            date: None,
        },
    };

    // Load the feed once and publish it to the terminal adapter
    let decoder = config.decoder().map_err(ClientError::Config)?;
    let state = config.interaction_state().map_err(ClientError::Config)?;
    let source = build_source(cli.file.as_deref(), &config)?;

    let mut adapter = TerminalAdapter::new(state);
    load_into(&mut adapter, source.as_ref(), &decoder).await;

    match command {
        Command::List { view, date } => commands::list::run(&adapter, view.into(), date, cli.json),
        Command::Show { index } => commands::show::run(&mut adapter, index, cli.json),
        Command::Link { index, open } => commands::link::run(&mut adapter, index, open, cli.json),
        // Handled before the feed is loaded
        Command::Config { .. } => Ok(()),
    }
}
