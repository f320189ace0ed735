//! Logger builder implementation

use tracing_subscriber::fmt::{self, TestWriter, writer::BoxMakeWriter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format, Writer};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build the filter without installing anything
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] if the directive string cannot be parsed.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::Filter(format!("{}: {e}", self.config.level)))
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<()> {
        let filter = self.filter()?;
        let display = &self.config.display;
        let colors = display.colors && cfg!(feature = "ansi");
        let subscriber = Registry::default().with(filter);

        let result = match self.config.format {
            Format::Pretty => subscriber
                .with(
                    fmt::layer()
                        .pretty()
                        .with_ansi(colors)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_writer(make_writer(self.config.writer)),
                )
                .try_init(),
            Format::Compact => subscriber
                .with(
                    fmt::layer()
                        .compact()
                        .with_ansi(colors)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_writer(make_writer(self.config.writer)),
                )
                .try_init(),
            Format::Json => subscriber
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_writer(make_writer(self.config.writer)),
                )
                .try_init(),
        };

        result.map_err(|e| LogError::Init(e.to_string()))?;
        tracing::debug!(level = %self.config.level, format = ?self.config.format, "logger initialized");
        Ok(())
    }
}

fn make_writer(writer: Writer) -> BoxMakeWriter {
    match writer {
        Writer::Stderr => BoxMakeWriter::new(std::io::stderr),
        Writer::Stdout => BoxMakeWriter::new(std::io::stdout),
        Writer::Test => BoxMakeWriter::new(TestWriter::new),
    }
}
