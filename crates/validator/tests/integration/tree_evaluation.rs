//! Evaluation semantics: short-circuiting, gating, child merging.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use formcheck_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::common::{failing, message, root, sibling_of, skipping};

#[test]
fn empty_node_evaluates_to_empty_map() {
    let (_, node) = root();
    assert_eq!(node.evaluate().unwrap(), OutcomeMap::new());
    assert!(node.is_valid().unwrap());
}

#[test]
fn first_failure_wins() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counting = {
        let calls = Arc::clone(&calls);
        Rule::new(move |_: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            RuleOutcome::fail("B")
        })
    };

    let (_, mut node) = root();
    node.add_rule("x", failing("A"))
        .unwrap()
        .add_rule("x", counting)
        .unwrap();

    let outcomes = node.evaluate().unwrap();
    assert_eq!(outcomes.get("x"), Some(&message("A")));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn skip_stops_field_as_valid() {
    let (_, mut node) = root();
    node.add_rule("x", skipping())
        .unwrap()
        .add_rule("x", failing("never reached"))
        .unwrap();
    assert_eq!(node.evaluate().unwrap(), OutcomeMap::all_clear(["x"]));
}

#[test]
fn evaluation_is_idempotent() {
    let (session, mut node) = root();
    session.set_input("email", "bad");
    node.add_rule("email", required())
        .unwrap()
        .add_rule("email", email())
        .unwrap()
        .add_rule("name", required())
        .unwrap();

    let first = node.evaluate().unwrap();
    let second = node.evaluate().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.fields().collect::<Vec<_>>(),
        second.fields().collect::<Vec<_>>()
    );
}

#[rstest]
#[case(json!(""), message("Required"))]
#[case(json!("bad"), message("Not a valid email address"))]
#[case(json!("a@b.com"), None)]
fn email_scenario(#[case] value: Value, #[case] expected: Option<FieldMessage>) {
    let (session, mut node) = root();
    node.add_rule("email", required())
        .unwrap()
        .add_rule("email", email())
        .unwrap();

    session.set_input("email", value);
    let expected: OutcomeMap = [("email".to_owned(), expected)].into_iter().collect();
    assert_eq!(node.evaluate().unwrap(), expected);
}

#[test]
fn unchecked_box_gets_its_specific_message() {
    let (session, mut node) = root();
    let accepted = Rule::new(|v: &Value| {
        (v != &Value::Bool(true)).then_some("You must accept the terms")
    })
    .with_label("accepted");
    node.add_rule("terms", required())
        .unwrap()
        .add_rule("terms", accepted)
        .unwrap();

    session.set_input("terms", false);
    assert_eq!(
        node.evaluate().unwrap().message("terms"),
        Some("You must accept the terms")
    );
    session.set_input("terms", true);
    assert!(node.is_valid().unwrap());
}

#[test]
fn child_error_is_not_overwritten_by_parent_without_opinion() {
    let (_, mut parent) = root();
    parent.add_rule("other", required()).unwrap();

    let mut child = sibling_of(&parent);
    child.add_rule("x", failing("bad")).unwrap();
    parent.add_child(child).unwrap();

    let outcomes = parent.evaluate().unwrap();
    assert_eq!(outcomes.get("x"), Some(&message("bad")));
}

#[test]
fn parent_clear_on_same_field_keeps_child_error() {
    let (session, mut parent) = root();
    session.set_input("x", "present");
    parent.add_rule("x", required()).unwrap();

    let mut child = sibling_of(&parent);
    child.add_rule("x", failing("child says no")).unwrap();
    parent.add_child(child).unwrap();

    assert_eq!(parent.evaluate().unwrap().message("x"), Some("child says no"));
}

#[test]
fn parent_error_on_same_field_replaces_child_error() {
    let (_, mut parent) = root();
    parent.add_rule("x", failing("parent")).unwrap();

    let mut child = sibling_of(&parent);
    child.add_rule("x", failing("child")).unwrap();
    parent.add_child(child).unwrap();

    assert_eq!(parent.evaluate().unwrap().message("x"), Some("parent"));
}

#[test]
fn later_sibling_error_wins_but_clear_does_not() {
    let (_, mut parent) = root();

    let mut first = sibling_of(&parent);
    first.add_rule("x", failing("first")).unwrap();
    let mut second = sibling_of(&parent);
    second.add_rule("x", skipping()).unwrap();
    let mut third = sibling_of(&parent);
    third.add_rule("y", failing("third")).unwrap();

    parent.add_child_labeled(first, "first").unwrap();
    parent.add_child_labeled(second, "second").unwrap();
    parent.add_child_labeled(third, "third").unwrap();

    let outcomes = parent.evaluate().unwrap();
    assert_eq!(outcomes.message("x"), Some("first"));
    assert_eq!(outcomes.message("y"), Some("third"));
}

#[test]
fn false_condition_suspends_own_rules() {
    let (_, mut node) = root();
    node.add_rule("y", failing("nope")).unwrap();
    node.set_condition(Some(Condition::new(|| false)));

    assert_eq!(node.evaluate().unwrap(), OutcomeMap::all_clear(["y"]));
}

#[test]
fn false_condition_still_evaluates_children() {
    let (_, mut parent) = root();
    parent.add_rule("own", failing("own")).unwrap();
    parent.set_condition(Some(Condition::new(|| false)));

    let mut child = sibling_of(&parent);
    child.add_rule("nested", failing("nested")).unwrap();
    parent.add_child(child).unwrap();

    let outcomes = parent.evaluate().unwrap();
    assert_eq!(outcomes.get("own"), Some(&None));
    assert_eq!(outcomes.message("nested"), Some("nested"));
}

#[test]
fn condition_is_read_on_every_evaluation() {
    let active = Arc::new(AtomicBool::new(false));
    let (_, mut node) = root();
    node.add_rule("y", failing("nope")).unwrap();
    node.set_condition(Some(Condition::new({
        let active = Arc::clone(&active);
        move || active.load(Ordering::SeqCst)
    })));

    assert!(node.is_valid().unwrap());
    active.store(true, Ordering::SeqCst);
    assert!(!node.is_valid().unwrap());

    node.set_condition(None);
    active.store(false, Ordering::SeqCst);
    assert!(!node.is_valid().unwrap());
}

#[test]
fn contact_child_scenario() {
    let (_, mut root_node) = root();
    root_node.add_rule("email", skipping()).unwrap();

    let mut contact = sibling_of(&root_node);
    contact.add_rule("phone", failing("missing")).unwrap();
    root_node.add_child_labeled(contact, "contact").unwrap();

    let outcomes = root_node.evaluate().unwrap();
    assert_eq!(outcomes.get("phone"), Some(&message("missing")));
    assert_eq!(
        outcomes.fields().collect::<Vec<_>>(),
        ["phone", "email"],
        "errors are listed first"
    );
    assert!(root_node.child("contact").is_some());
}

#[test]
fn faults_are_contained_to_their_field() {
    let (session, mut node) = root();
    session.set_input("age", "forty");
    node.add_rule("age", gte(18))
        .unwrap()
        .add_rule("name", required())
        .unwrap();

    let outcomes = node.evaluate().unwrap();
    assert_eq!(
        outcomes.message("age"),
        Some("An unexpected error occurred during input validation: expected a number, got string")
    );
    assert_eq!(outcomes.message("name"), Some("Required"));
}

#[test]
fn invalid_rule_result_escapes_evaluation() {
    let (_, mut node) = root();
    let mut child = sibling_of(&node);
    child
        .add_rule("x", Rule::new(|_: &Value| Some(String::new())).with_label("empty"))
        .unwrap();
    node.add_child(child).unwrap();

    let err = node.evaluate().unwrap_err();
    assert!(matches!(
        err,
        ValidatorError::InvalidRuleResult { ref field, ref rule, .. } if field == "x" && rule == "empty"
    ));
    assert!(node.is_valid().is_err());
}

#[test]
fn values_are_read_fresh_each_pass() {
    let (session, mut node) = root();
    node.add_rule("age", compose([required(), integer(), between(18, 120).into()]))
        .unwrap();

    assert_eq!(node.evaluate().unwrap().message("age"), Some("Required"));
    session.set_input("age", 12);
    assert_eq!(
        node.evaluate().unwrap().message("age"),
        Some("Must be between 18 and 120.")
    );
    session.set_input("age", 30);
    assert!(node.is_valid().unwrap());
}
