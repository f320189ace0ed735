//! Presence rules

use serde_json::Value;

use crate::foundation::{Rule, RuleOutcome};

/// Default message of [`required`].
pub const REQUIRED_MESSAGE: &str = "Required";

/// Whether a value counts as provided.
///
/// Only `null` and the empty string are missing. `false`, whitespace and
/// empty collections are values the user supplied.
pub fn input_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fails with `"Required"` when no value is provided.
pub fn required() -> Rule {
    required_with(REQUIRED_MESSAGE, input_provided)
}

/// Fails with `message` when `test` reports the value as missing.
pub fn required_with<F>(message: impl Into<String>, test: F) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Rule::new(move |value: &Value| {
        if test(value) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(message.clone())
        }
    })
    .with_label("required")
}

/// Skips the field's remaining rules when no value is provided.
///
/// Never fails. Place it first to make the rules after it apply only to
/// non-empty input.
pub fn optional() -> Rule {
    optional_with(input_provided)
}

/// Like [`optional`] with a custom presence test.
pub fn optional_with<F>(test: F) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Rule::new(move |value: &Value| {
        if test(value) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Skip
        }
    })
    .with_label("optional")
}
