//! Building blocks shared by the tree, the session layer and the rule library
//!
//! - **Rules**: [`Rule`], [`Condition`]
//! - **Verdicts**: [`RuleOutcome`], [`FieldMessage`], [`OutcomeMap`]
//! - **Scoping**: [`Namespace`]
//! - **Settings**: [`ValidatorConfig`]
//! - **Errors**: [`ValidatorError`], [`ConfigurationError`], [`RuleFault`]

mod config;
mod error;
mod namespace;
mod outcome;
mod rule;

pub use config::{DEFAULT_PRIORITY, ValidatorConfig};
pub use error::{ConfigurationError, FAULT_MESSAGE_PREFIX, Result, RuleFault, ValidatorError};
pub use namespace::{Namespace, SEPARATOR};
pub use outcome::{FieldMessage, OutcomeMap, RuleOutcome};
pub use rule::{Condition, Rule};
