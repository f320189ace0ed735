//! Prebuilt rules
//!
//! Pure factories returning [`Rule`] values:
//!
//! - **Presence**: [`required`], [`optional`], [`input_provided`]
//! - **Text**: [`regex`], [`email`], [`url`]
//! - **Numeric**: [`integer`], [`between`], [`gt`], [`gte`], [`lt`], [`lte`],
//!   [`equal`], [`not_equal`]
//! - **Membership**: [`in_set`]
//! - **Composition**: [`compose`]
//!
//! Builders ([`Between`], [`Comparison`], [`InSet`]) convert into [`Rule`], so
//! they can be passed straight to
//! [`ValidationNode::add_rule`](crate::tree::ValidationNode::add_rule).
//!
//! # Examples
//!
//! ```rust,ignore
//! use formcheck_validator::prelude::*;
//!
//! root.add_rule("email", required())?
//!     .add_rule("email", email())?;
//! root.add_rule("age", compose([optional(), integer(), gte(18).into()]))?;
//! ```

mod numeric;
mod pattern;
mod presence;
mod set;

pub use numeric::{
    Between, Comparator, Comparison, INTEGER_MESSAGE, between, equal, gt, gte, integer,
    integer_with, lt, lte, not_equal,
};
pub use pattern::{
    EMAIL_MESSAGE, TextFormat, URL_MESSAGE, email, email_with, regex, url, url_with,
};
pub use presence::{
    REQUIRED_MESSAGE, input_provided, optional, optional_with, required, required_with,
};
pub use set::{DEFAULT_SET_LIMIT, InSet, in_set, prepare_values_text};

use serde_json::Value;

use crate::foundation::{Rule, RuleFault, RuleOutcome};

/// Message of rules that reject a missing (`null`) value.
pub const MISSING_VALUE_MESSAGE: &str = "Value must not be 'None'";

/// Runs `rules` in order and returns the first verdict that is not
/// [`RuleOutcome::Pass`].
///
/// A fault in any inner rule is a fault of the composed rule.
pub fn compose<I>(rules: I) -> Rule
where
    I: IntoIterator<Item = Rule>,
{
    let rules: Vec<Rule> = rules.into_iter().collect();
    let label = format!(
        "compose({})",
        rules.iter().map(Rule::label).collect::<Vec<_>>().join(", ")
    );
    Rule::fallible(move |value: &Value| {
        for rule in &rules {
            let outcome = rule.apply(value)?;
            if outcome.is_final() {
                return Ok(outcome);
            }
        }
        Ok::<_, RuleFault>(RuleOutcome::Pass)
    })
    .with_label(label)
}

// ============================================================================
// VALUE HELPERS
// ============================================================================

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn expect_text(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected text, got {}", kind(value)))
}

pub(crate) fn expect_number(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected a number, got {}", kind(value)))
}

/// `18.0` renders as `18`, `2.5` as `2.5`.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

/// Text without JSON quoting, anything else in JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
