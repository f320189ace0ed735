//! Set membership rule

use serde_json::Value;

use super::display_value;
use crate::foundation::{Rule, RuleOutcome};

/// Number of values listed in the default message before truncation.
pub const DEFAULT_SET_LIMIT: usize = 3;

/// Membership rule builder, converted into a [`Rule`] when attached.
///
/// # Examples
///
/// ```rust,ignore
/// node.add_rule("size", in_set(["S", "M", "L", "XL"]))?;
/// // "Must be in the set of S, M, L (and 1 more)."
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct InSet {
    values: Vec<Value>,
    limit: Option<usize>,
    template: String,
}

impl InSet {
    /// Accepted values; duplicates are dropped, first occurrence wins.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if !unique.iter().any(|seen| same_value(seen, &value)) {
                unique.push(value);
            }
        }
        Self {
            values: unique,
            limit: Some(DEFAULT_SET_LIMIT),
            template: "Must be in the set of {values_text}.".to_owned(),
        }
    }

    /// How many values the message lists; `None` lists all of them.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Message template; `{values_text}` is substituted.
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Shorthand for [`InSet::new`].
pub fn in_set<I, V>(values: I) -> InSet
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    InSet::new(values)
}

/// Renders `values` for a message, listing at most `limit` of them.
///
/// ```rust,ignore
/// assert_eq!(prepare_values_text(&[json!(1), json!(2), json!(3), json!(4)], Some(2)),
///            "1, 2 (and 2 more)");
/// ```
pub fn prepare_values_text(values: &[Value], limit: Option<usize>) -> String {
    let shown = limit.map_or(values.len(), |limit| limit.min(values.len()));
    let listed = values[..shown]
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ");

    let omitted = values.len() - shown;
    if omitted > 0 {
        format!("{listed} (and {omitted} more)")
    } else {
        listed
    }
}

/// JSON equality, except that numbers compare by magnitude (`2.0` equals `2`).
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

impl From<InSet> for Rule {
    fn from(set: InSet) -> Self {
        let message = set
            .template
            .replace("{values_text}", &prepare_values_text(&set.values, set.limit));
        Rule::new(move |value: &Value| {
            if set.values.iter().any(|member| same_value(member, value)) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::fail(message.clone())
            }
        })
        .with_label("in_set")
    }
}
