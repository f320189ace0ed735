//! Error types for validator construction and evaluation
//!
//! Three kinds of failure exist and they surface in different places:
//!
//! - [`ConfigurationError`]: misuse while building a tree. Returned by the
//!   call that caused it, never deferred to evaluation.
//! - [`RuleFault`]: a rule failed internally. Never escapes evaluation; the
//!   evaluator turns it into a field message prefixed with
//!   [`FAULT_MESSAGE_PREFIX`].
//! - [`ValidatorError::InvalidRuleResult`]: a rule produced a verdict that
//!   breaks the outcome contract. Aborts evaluation.

use thiserror::Error;

/// Prefix of the field message that replaces a faulting rule's verdict.
pub const FAULT_MESSAGE_PREFIX: &str = "An unexpected error occurred during input validation: ";

/// Result alias used throughout the crate.
pub type Result<T, E = ValidatorError> = std::result::Result<T, E>;

// ============================================================================
// CRATE ERROR
// ============================================================================

/// Errors raised by validator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// The tree was configured incorrectly.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A rule returned a verdict that cannot be placed in an outcome map.
    #[error("rule `{rule}` returned an invalid result for field `{field}`: {reason}")]
    InvalidRuleResult {
        /// Qualified name of the field being evaluated.
        field: String,
        /// Label of the offending rule.
        rule: String,
        /// What was wrong with the result.
        reason: String,
    },
}

impl ValidatorError {
    /// Returns `true` for errors caused by tree configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// Programmer misuse detected while building a validation tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A rule was attached to a blank field name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A child was attached under a blank label.
    #[error("child label must not be empty")]
    EmptyChildLabel,

    /// A child label is already taken within the parent.
    #[error("child label `{label}` is already in use")]
    DuplicateChildLabel {
        /// The colliding label.
        label: String,
    },

    /// A pattern-based rule was given a pattern that does not compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

// ============================================================================
// RULE FAULT
// ============================================================================

/// Internal failure of a single rule.
///
/// Rules built with [`Rule::fallible`](crate::foundation::Rule::fallible)
/// report faults through their `Err` branch; panics are captured as faults
/// too. The evaluator logs the fault and records
/// [`RuleFault::field_message`] for the field instead of propagating it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct RuleFault {
    description: String,
}

impl RuleFault {
    /// Creates a fault with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The original failure description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Message shown for the field whose rule faulted.
    pub fn field_message(&self) -> String {
        format!("{FAULT_MESSAGE_PREFIX}{}", self.description)
    }
}
