//! Logger configuration

mod presets;

use serde::{Deserialize, Serialize};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented.
    Pretty,
    /// Single line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl Format {
    /// Parses a format name, falling back to [`Format::Compact`].
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Where formatted events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Writer {
    #[default]
    Stderr,
    Stdout,
    /// Test harness capture (`print!`-based, shown only for failing tests).
    Test,
}

/// Display toggles that do not change the format itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ANSI colors (ignored without the `ansi` feature).
    pub colors: bool,
    /// Event target (module path).
    pub target: bool,
    /// Source file and line.
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: cfg!(feature = "ansi"),
            target: true,
            source: false,
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive string, e.g. `"info,formcheck_validator=debug"`.
    pub level: String,
    pub format: Format,
    pub writer: Writer,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::default(),
            writer: Writer::default(),
            display: DisplayConfig::default(),
        }
    }
}
