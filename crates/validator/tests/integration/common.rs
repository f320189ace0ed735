//! Shared helpers.

use formcheck_validator::prelude::*;
use serde_json::Value;

/// Rule that always fails with `message`.
pub fn failing(message: &'static str) -> Rule {
    Rule::new(move |_: &Value| RuleOutcome::fail(message)).with_label(message)
}

/// Rule that always answers `Skip`.
pub fn skipping() -> Rule {
    Rule::new(|_: &Value| RuleOutcome::Skip).with_label("skip")
}

/// Root node over a fresh session, with test logging installed.
pub fn root() -> (MemorySession, ValidationNode) {
    formcheck_log::init_test();
    let session = MemorySession::new();
    let node = ValidationNode::new(session.clone());
    (session, node)
}

/// Node sharing `parent`'s session.
pub fn sibling_of(parent: &ValidationNode) -> ValidationNode {
    ValidationNode::from_shared(parent.session().clone())
}

pub fn message(text: &str) -> Option<FieldMessage> {
    Some(FieldMessage::text(text))
}
