//! Text pattern rules

use std::sync::{Arc, LazyLock};

use ::regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::expect_text;
use crate::foundation::{ConfigurationError, Rule, RuleOutcome};

/// Default message of [`email`].
pub const EMAIL_MESSAGE: &str = "Not a valid email address";

/// Default message of [`url`].
pub const URL_MESSAGE: &str = "Not a valid URL";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*[A-Z0-9._%&'*+`/=?^{}~-]+@[A-Z0-9.-]+\.[A-Z0-9]{2,}\s*$")
        .expect("email pattern is valid")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?:https?|ftp)://)",
        r"(?:\S+(?::\S*)?@)?",
        r"(?:[a-z0-9\x{00a1}-\x{ffff}]-*)*[a-z0-9\x{00a1}-\x{ffff}]+",
        r"(?:\.(?:[a-z0-9\x{00a1}-\x{ffff}]-*)*[a-z0-9\x{00a1}-\x{ffff}]+)*",
        r"(?:\.[a-z0-9\x{00a1}-\x{ffff}]{2,})",
        r"(?::\d{2,5})?",
        r"(?:/\S*)?$",
    ))
    .expect("url pattern is valid")
});

/// Input shape accepted by [`email_with`] and [`url_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormat {
    /// Accept a comma separated list; every entry must match.
    pub allow_multiple: bool,
    /// Pass on `null` instead of faulting.
    pub allow_missing: bool,
}

/// Fails with `message` when the text does not match `pattern` anywhere.
///
/// An invalid pattern is a configuration error, reported here rather than
/// at evaluation.
pub fn regex(
    pattern: &str,
    message: impl Into<String>,
    ignore_case: bool,
) -> Result<Rule, ConfigurationError> {
    let compiled = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| ConfigurationError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })?;

    let message = message.into();
    Ok(Rule::fallible(move |value: &Value| {
        let text = expect_text(value)?;
        Ok::<_, String>(if compiled.is_match(text) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(message.clone())
        })
    })
    .with_label(format!("regex({pattern})")))
}

/// Email address check with the default message.
pub fn email() -> Rule {
    email_with(EMAIL_MESSAGE, TextFormat::default())
}

pub fn email_with(message: impl Into<String>, format: TextFormat) -> Rule {
    formatted("email", &EMAIL_REGEX, message.into(), format)
}

/// http, https or ftp URL check with the default message.
pub fn url() -> Rule {
    url_with(URL_MESSAGE, TextFormat::default())
}

pub fn url_with(message: impl Into<String>, format: TextFormat) -> Rule {
    formatted("url", &URL_REGEX, message.into(), format)
}

fn formatted(
    label: &'static str,
    pattern: &'static LazyLock<Regex>,
    message: String,
    format: TextFormat,
) -> Rule {
    let message: Arc<str> = message.into();
    Rule::fallible(move |value: &Value| {
        if format.allow_missing && value.is_null() {
            return Ok(RuleOutcome::Pass);
        }
        let text = expect_text(value)?;

        let matches = if format.allow_multiple {
            text.split(',').all(|entry| pattern.is_match(entry.trim()))
        } else {
            pattern.is_match(text)
        };
        Ok::<_, String>(if matches {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(&*message)
        })
    })
    .with_label(label)
}
