//! Log set-up driven by configuration.
//!
//! [`LogConfig`] carries its defaults as tags, so it loads through a
//! [`Reader`](crate::Reader) like any other config struct, and turns into a
//! `tracing-subscriber` formatter with [`LogConfig::dispatch`] or
//! [`LogConfig::init`].

mod color;

use std::{fs::OpenOptions, io::IsTerminal, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{Dispatch, info, level_filters::LevelFilter, warn};
use tracing_subscriber::fmt::{MakeWriter, time::ChronoUtc};

pub use color::ColorMode;

use crate::{Walkable, error::ConfigError};

/// Time format applied when none is configured.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Log output used when none is configured.
pub const DEFAULT_FILE: &str = "/dev/stderr";

/// Configuration of the log output.
///
/// Empty fields behave like their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Walkable)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level: `panic`, `fatal`, `error`, `warn`, `info`, `debug`,
    /// or `trace`.
    #[confwalk(default = "info")]
    pub level: String,
    /// `strftime` format of timestamps, rendered in UTC.
    // Quoted: a plain YAML scalar cannot start with `%`.
    #[confwalk(default = "'%Y-%m-%dT%H:%M:%S%.6f'")]
    pub time_format: String,
    /// Whether events report their source file and line.
    #[confwalk(default = false)]
    pub caller: bool,
    /// File the output is appended to.
    #[confwalk(default = "/dev/stderr")]
    pub file: String,
    /// Colour mode list; see [`ColorMode::parse`].
    #[confwalk(default = "auto")]
    pub color_mode: String,
    /// Output format; see [`Formatter::parse`].
    #[confwalk(default = "pretty")]
    pub formatter: String,
}

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Formatter {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// Single-line text output.
    Text,
    /// Newline delimited JSON objects.
    Json,
}

impl Formatter {
    /// Parse a formatter name; unknown names select [`Formatter::Pretty`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Parse a level name. `panic` and `fatal` map to `ERROR`, as tracing has no
/// more severe level.
#[must_use]
pub fn parse_level(text: &str) -> Option<LevelFilter> {
    match text.trim().to_ascii_lowercase().as_str() {
        "panic" | "fatal" | "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

impl LogConfig {
    /// Configured maximum level, `INFO` when the level is not recognised.
    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        parse_level(&self.level).unwrap_or(LevelFilter::INFO)
    }

    /// Configured colour mode.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::parse(&self.color_mode)
    }

    /// Configured output format.
    #[must_use]
    pub fn formatter(&self) -> Formatter {
        Formatter::parse(&self.formatter)
    }

    /// Configured time format.
    #[must_use]
    pub fn time_format(&self) -> &str {
        if self.time_format.is_empty() {
            DEFAULT_TIME_FORMAT
        } else {
            &self.time_format
        }
    }

    /// Configured output file.
    #[must_use]
    pub fn output(&self) -> &str {
        if self.file.is_empty() {
            DEFAULT_FILE
        } else {
            &self.file
        }
    }

    /// Build a dispatcher writing to `writer`. `terminal` tells whether the
    /// writer is a terminal, which decides the `auto` colour mode.
    #[must_use]
    pub fn dispatch<W>(&self, writer: W, terminal: bool) -> Dispatch
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(self.level_filter())
            .with_timer(ChronoUtc::new(self.time_format().to_owned()))
            .with_ansi(self.color_mode().ansi(terminal))
            .with_file(self.caller)
            .with_line_number(self.caller);
        match self.formatter() {
            Formatter::Pretty => Dispatch::new(builder.pretty().finish()),
            Formatter::Text => Dispatch::new(builder.compact().finish()),
            Formatter::Json => Dispatch::new(builder.json().finish()),
        }
    }

    /// Append to the configured output and install the dispatcher as the
    /// global default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Logging`] when the output cannot be opened or
    /// a global dispatcher is already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let target = self.output();
        let logging = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::Logging {
            target: target.to_owned(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .map_err(|err| logging(Box::new(err)))?;
        let terminal = file.is_terminal();
        tracing::dispatcher::set_global_default(self.dispatch(Arc::new(file), terminal))
            .map_err(|err| logging(Box::new(err)))?;
        self.report_level();
        Ok(())
    }

    fn report_level(&self) {
        if parse_level(&self.level).is_some() {
            info!(level = %self.level, "setting up log level");
        } else {
            warn!(config = %self.level, "failed setting log level");
        }
    }
}
