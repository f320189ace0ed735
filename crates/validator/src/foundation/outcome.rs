//! Verdicts produced by rules and the outcome map produced by a tree
//!
//! A single rule answers with a [`RuleOutcome`]. Evaluating a tree folds the
//! per-field verdicts into an [`OutcomeMap`]: qualified field name to either
//! `None` (valid) or a [`FieldMessage`] (invalid).
//!
//! The map serializes to the shape display layers consume:
//!
//! ```json
//! { "email": { "type": "error", "message": "Required", "is_html": false },
//!   "age": null }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD MESSAGE
// ============================================================================

/// Message attached to an invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename = "error")]
pub struct FieldMessage {
    /// Text shown to the end user.
    pub message: String,
    /// Whether `message` is markup rather than plain text.
    pub is_html: bool,
}

impl FieldMessage {
    /// Plain-text message.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_html: false,
        }
    }

    /// Markup message, rendered as-is by the display layer.
    pub fn html(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_html: true,
        }
    }
}

impl fmt::Display for FieldMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// Verdict of one rule for one field value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOutcome {
    /// No objection; the next rule for the field runs.
    #[default]
    Pass,
    /// The field is valid and its remaining rules are skipped.
    Skip,
    /// The field is invalid; remaining rules are skipped.
    Fail(FieldMessage),
}

impl RuleOutcome {
    /// Plain-text failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(FieldMessage::text(message))
    }

    /// Markup failure.
    pub fn fail_html(message: impl Into<String>) -> Self {
        Self::Fail(FieldMessage::html(message))
    }

    /// Returns `true` when this verdict ends evaluation of the field.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pass)
    }
}

impl From<FieldMessage> for RuleOutcome {
    fn from(message: FieldMessage) -> Self {
        Self::Fail(message)
    }
}

impl From<Option<String>> for RuleOutcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::Pass, Self::fail)
    }
}

impl From<Option<&str>> for RuleOutcome {
    fn from(message: Option<&str>) -> Self {
        message.map_or(Self::Pass, Self::fail)
    }
}

// ============================================================================
// OUTCOME MAP
// ============================================================================

/// Result of one evaluation pass: qualified field name to verdict.
///
/// Insertion order is kept; the merger places invalid fields first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeMap(IndexMap<String, Option<FieldMessage>>);

impl OutcomeMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every given field marked valid.
    pub fn all_clear<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields.into_iter().map(|f| (f.into(), None)).collect()
    }

    /// Records a verdict, replacing any previous verdict for `field`.
    pub fn insert(&mut self, field: impl Into<String>, verdict: Option<FieldMessage>) {
        self.0.insert(field.into(), verdict);
    }

    /// Verdict for `field`, or `None` when the field is absent.
    pub fn get(&self, field: &str) -> Option<&Option<FieldMessage>> {
        self.0.get(field)
    }

    /// Error message for `field`, if it is present and invalid.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Option::as_ref)
            .map(|m| m.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `true` when no field carries a message.
    pub fn is_valid(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// Invalid fields with their messages, in map order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldMessage)> {
        self.0
            .iter()
            .filter_map(|(field, verdict)| verdict.as_ref().map(|m| (field.as_str(), m)))
    }

    /// Field names in map order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Same keys, every verdict cleared.
    pub fn cleared(&self) -> Self {
        Self::all_clear(self.0.keys().cloned())
    }

    /// Merges `other` into `self`; see [`merge`](crate::tree::merge).
    pub fn merge(self, other: Self) -> Self {
        crate::tree::merge(self, other)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Option<FieldMessage>> {
        self.0.iter()
    }

    /// Unwraps into the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, Option<FieldMessage>> {
        self.0
    }
}

impl From<IndexMap<String, Option<FieldMessage>>> for OutcomeMap {
    fn from(map: IndexMap<String, Option<FieldMessage>>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Option<FieldMessage>)> for OutcomeMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<FieldMessage>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for OutcomeMap {
    type Item = (String, Option<FieldMessage>);
    type IntoIter = indexmap::map::IntoIter<String, Option<FieldMessage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OutcomeMap {
    type Item = (&'a String, &'a Option<FieldMessage>);
    type IntoIter = indexmap::map::Iter<'a, String, Option<FieldMessage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
