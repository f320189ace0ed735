//! Rule and condition values
//!
//! A [`Rule`] is a labelled, cheaply clonable function from a field value to a
//! [`RuleOutcome`]. Rules are expected to be pure: they must not block and
//! must answer ordinary invalid input with [`RuleOutcome::Fail`] rather than a
//! fault.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formcheck_validator::prelude::*;
//! use serde_json::Value;
//!
//! // Infallible: `None` passes, `Some(msg)` fails.
//! let not_admin = Rule::new(|v: &Value| (v == "admin").then_some("Reserved name"))
//!     .with_label("not_admin");
//!
//! // Fallible: an `Err` is a fault, reported with a diagnostic message.
//! let even = Rule::fallible(|v: &Value| {
//!     let n = v.as_i64().ok_or("expected an integer")?;
//!     Ok::<_, &str>((n % 2 != 0).then_some("Must be even"))
//! });
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::error::RuleFault;
use super::outcome::RuleOutcome;

type RuleFn = dyn Fn(&Value) -> Result<RuleOutcome, RuleFault> + Send + Sync;

/// A validation rule for a single field.
#[derive(Clone)]
pub struct Rule {
    label: Cow<'static, str>,
    func: Arc<RuleFn>,
}

impl Rule {
    /// Wraps an infallible rule function.
    ///
    /// The function may return anything convertible into [`RuleOutcome`],
    /// including `Option<String>` and `Option<&str>`.
    pub fn new<F, O>(f: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<RuleOutcome>,
    {
        Self {
            label: Cow::Borrowed(type_name::<F>()),
            func: Arc::new(move |value: &Value| -> Result<RuleOutcome, RuleFault> {
                Ok(f(value).into())
            }),
        }
    }

    /// Wraps a rule function that may fault.
    pub fn fallible<F, O, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<O, E> + Send + Sync + 'static,
        O: Into<RuleOutcome>,
        E: fmt::Display,
    {
        Self {
            label: Cow::Borrowed(type_name::<F>()),
            func: Arc::new(move |value: &Value| -> Result<RuleOutcome, RuleFault> {
                f(value)
                    .map(Into::into)
                    .map_err(|e| RuleFault::new(e.to_string()))
            }),
        }
    }

    /// Replaces the diagnostic label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Label used in logs and error reports.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the rule against a value.
    ///
    /// Panics inside the rule are not caught here; the evaluator does that.
    pub fn apply(&self, value: &Value) -> Result<RuleOutcome, RuleFault> {
        (self.func)(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CONDITION
// ============================================================================

/// Gating predicate for a validation node.
///
/// While it returns `false` the node's own rules are suspended and its own
/// fields report valid. Child nodes are still evaluated.
#[derive(Clone)]
pub struct Condition(Arc<dyn Fn() -> bool + Send + Sync>);

impl Condition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Evaluates the predicate.
    pub fn holds(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").finish_non_exhaustive()
    }
}
