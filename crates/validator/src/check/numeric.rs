//! Numeric rules: integers, ranges and comparisons
//!
//! Range and comparison rules fault on non-numeric input. A missing value
//! (`null`) fails with [`MISSING_VALUE_MESSAGE`] unless `allow_missing` is set.

use serde_json::Value;

use super::{MISSING_VALUE_MESSAGE, expect_number, format_number};
use crate::foundation::{Rule, RuleOutcome};

/// Default message of [`integer`].
pub const INTEGER_MESSAGE: &str = "An integer is required";

// ============================================================================
// INTEGER
// ============================================================================

/// Fails unless the value is a whole JSON number.
pub fn integer() -> Rule {
    integer_with(INTEGER_MESSAGE, false)
}

pub fn integer_with(message: impl Into<String>, allow_missing: bool) -> Rule {
    let message = message.into();
    Rule::new(move |value: &Value| match value {
        Value::Null if allow_missing => RuleOutcome::Pass,
        Value::Null => RuleOutcome::fail(MISSING_VALUE_MESSAGE),
        Value::Number(n) if n.is_i64() || n.is_u64() => RuleOutcome::Pass,
        _ => RuleOutcome::fail(message.clone()),
    })
    .with_label("integer")
}

// ============================================================================
// BETWEEN
// ============================================================================

/// Range rule builder, converted into a [`Rule`] when attached.
///
/// Both bounds are inclusive by default.
///
/// # Examples
///
/// ```rust,ignore
/// node.add_rule("age", between(18, 120))?;
/// node.add_rule("ratio", between(0, 1).inclusive(false, true).message("Pick ({left}, {right}]"))?;
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Between {
    left: f64,
    right: f64,
    inclusive: (bool, bool),
    template: String,
    allow_missing: bool,
}

impl Between {
    pub fn new(left: impl Into<f64>, right: impl Into<f64>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            inclusive: (true, true),
            template: "Must be between {left} and {right}.".to_owned(),
            allow_missing: false,
        }
    }

    pub fn inclusive(mut self, left: bool, right: bool) -> Self {
        self.inclusive = (left, right);
        self
    }

    /// Message template; `{left}` and `{right}` are substituted.
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    fn contains(&self, n: f64) -> bool {
        let above_left = if self.inclusive.0 { n >= self.left } else { n > self.left };
        let below_right = if self.inclusive.1 { n <= self.right } else { n < self.right };
        above_left && below_right
    }

    fn rendered_message(&self) -> String {
        self.template
            .replace("{left}", &format_number(self.left))
            .replace("{right}", &format_number(self.right))
    }
}

/// Shorthand for [`Between::new`].
pub fn between(left: impl Into<f64>, right: impl Into<f64>) -> Between {
    Between::new(left, right)
}

impl From<Between> for Rule {
    fn from(range: Between) -> Self {
        let message = range.rendered_message();
        let label = format!(
            "between({}, {})",
            format_number(range.left),
            format_number(range.right)
        );
        Rule::fallible(move |value: &Value| {
            if value.is_null() {
                return Ok(missing_outcome(range.allow_missing));
            }
            let n = expect_number(value)?;
            Ok::<_, String>(if range.contains(n) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::fail(message.clone())
            })
        })
        .with_label(label)
    }
}

// ============================================================================
// COMPARISONS
// ============================================================================

/// Relation checked by a [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Gt,
    Gte,
    Lt,
    Lte,
    Equal,
    NotEqual,
}

impl Comparator {
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Gte => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Lte => lhs <= rhs,
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }

    fn default_template(self) -> &'static str {
        match self {
            Self::Gt => "Must be greater than {rhs}.",
            Self::Gte => "Must be greater than or equal to {rhs}.",
            Self::Lt => "Must be less than {rhs}.",
            Self::Lte => "Must be less than or equal to {rhs}.",
            Self::Equal => "Must be equal to {rhs}.",
            Self::NotEqual => "Must not be equal to {rhs}.",
        }
    }
}

/// Comparison rule builder, converted into a [`Rule`] when attached.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Comparison {
    comparator: Comparator,
    rhs: f64,
    template: Option<String>,
    allow_missing: bool,
}

impl Comparison {
    pub fn new(comparator: Comparator, rhs: impl Into<f64>) -> Self {
        Self {
            comparator,
            rhs: rhs.into(),
            template: None,
            allow_missing: false,
        }
    }

    /// Message template; `{rhs}` is substituted.
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    fn rendered_message(&self) -> String {
        self.template
            .as_deref()
            .unwrap_or_else(|| self.comparator.default_template())
            .replace("{rhs}", &format_number(self.rhs))
    }
}

pub fn gt(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::Gt, rhs)
}

pub fn gte(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::Gte, rhs)
}

pub fn lt(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::Lt, rhs)
}

pub fn lte(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::Lte, rhs)
}

pub fn equal(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::Equal, rhs)
}

pub fn not_equal(rhs: impl Into<f64>) -> Comparison {
    Comparison::new(Comparator::NotEqual, rhs)
}

impl From<Comparison> for Rule {
    fn from(cmp: Comparison) -> Self {
        let message = cmp.rendered_message();
        let label = format!("{} {}", cmp.comparator.symbol(), format_number(cmp.rhs));
        Rule::fallible(move |value: &Value| {
            if value.is_null() {
                return Ok(missing_outcome(cmp.allow_missing));
            }
            let n = expect_number(value)?;
            Ok::<_, String>(if cmp.comparator.holds(n, cmp.rhs) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::fail(message.clone())
            })
        })
        .with_label(label)
    }
}

fn missing_outcome(allow_missing: bool) -> RuleOutcome {
    if allow_missing {
        RuleOutcome::Pass
    } else {
        RuleOutcome::fail(MISSING_VALUE_MESSAGE)
    }
}
