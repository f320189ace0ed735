//! Per-node validator settings

use serde::{Deserialize, Serialize};

/// Priority used for change-notification registration when none is configured.
///
/// High enough that validation runs before ordinary observers of the same
/// fields.
pub const DEFAULT_PRIORITY: i32 = 1000;

/// Settings for a [`ValidationNode`](crate::tree::ValidationNode).
///
/// # Examples
///
/// ```rust,ignore
/// let config = ValidatorConfig { verbose: true, ..ValidatorConfig::default() };
/// let root = ValidationNode::new(session).with_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Priority passed to the host when registering for field changes.
    pub priority: i32,
    /// Emit a debug event for every node visit and rule verdict.
    pub verbose: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            verbose: false,
        }
    }
}

impl ValidatorConfig {
    /// Reads `FORMCHECK_PRIORITY` and `FORMCHECK_VERBOSE`.
    ///
    /// Unset variables keep their defaults; unparsable ones are ignored with
    /// a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("FORMCHECK_PRIORITY") {
            match raw.trim().parse() {
                Ok(priority) => config.priority = priority,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring FORMCHECK_PRIORITY"),
            }
        }

        if let Some(raw) = lookup("FORMCHECK_VERBOSE") {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.verbose = true,
                "0" | "false" | "no" | "off" | "" => config.verbose = false,
                _ => tracing::warn!(value = %raw, "ignoring FORMCHECK_VERBOSE"),
            }
        }

        config
    }

    /// Debug preset: verbose evaluation tracing.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }
}
