//! Tracing setup for feedgrid.
//!
//! Logs always go to stderr so command output on stdout stays
//! machine-readable. `RUST_LOG` takes precedence over the configured level.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// One short human-readable line per event
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Logging settings for the feedgrid crates.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for `feedgrid*` targets when `RUST_LOG` is unset
    pub level: Level,
    /// Line format
    pub format: TracingOutputFormat,
    /// Print source file and line
    pub show_location: bool,
    /// Print timestamps
    pub show_time: bool,
    /// Explicit filter directive, used instead of `RUST_LOG` and `level`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            show_location: false,
            show_time: true,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// `--debug`: everything from the feed pipeline, with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            show_location: true,
            show_time: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The directive applied when neither `RUST_LOG` nor `env_filter` is set.
    pub fn default_directive(&self) -> String {
        format!("feedgrid={}", self.level)
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.show_location)
            .with_line_number(self.show_location);

        match (self.format, self.show_time) {
            (TracingOutputFormat::Json, _) => base.json().boxed(),
            (TracingOutputFormat::Compact, true) => base.compact().boxed(),
            (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails if a subscriber is already installed or `env_filter` does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;
    let subscriber = tracing_subscriber::registry().with(config.layer()).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_logs_warnings() {
        let config = TracingConfig::default();
        assert_eq!(config.format, TracingOutputFormat::Compact);
        assert!(!config.show_location);
        assert_eq!(config.default_directive(), "feedgrid=WARN");
    }

    #[test]
    fn debug_config() {
        let config = TracingConfig::cli_debug();
        assert_eq!(config.default_directive(), "feedgrid=DEBUG");
        assert!(config.show_location);
        assert!(!config.show_time);
    }

    #[test]
    fn explicit_filter_must_parse() {
        let config = TracingConfig::default().with_env_filter("feedgrid=loud");
        assert!(matches!(config.filter(), Err(TracingError::EnvFilter(_))));

        let config = TracingConfig::default().with_env_filter("feedgrid_feed=trace");
        assert!(config.filter().is_ok());
    }

    #[test]
    fn json_format() {
        let config = TracingConfig::default()
            .with_level(Level::INFO)
            .with_format(TracingOutputFormat::Json);
        assert_eq!(config.format, TracingOutputFormat::Json);
        assert_eq!(config.default_directive(), "feedgrid=INFO");
    }
}
