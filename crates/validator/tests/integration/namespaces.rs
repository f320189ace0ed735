//! Reusable form modules scoped by namespace.

use formcheck_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::root;

/// Password pair module: both fields required, second must match the first.
fn password_module(parent: &ValidationNode, namespace: Namespace) -> ValidationNode {
    let session = parent.session().clone();
    let first = namespace.qualify("pw1");
    let matches = Rule::new(move |value: &Value| {
        if *value == session.input(&first) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("Passwords do not match")
        }
    })
    .with_label("matches_pw1");

    let mut module = ValidationNode::from_shared(parent.session().clone()).in_namespace(namespace);
    module
        .add_rule("pw1", required())
        .unwrap()
        .add_rule("pw2", required())
        .unwrap()
        .add_rule("pw2", matches)
        .unwrap();
    module
}

#[test]
fn module_fields_are_qualified() {
    let (session, mut node) = root();
    let module = password_module(&node, Namespace::new("password"));
    node.add_child_labeled(module, "password").unwrap();

    assert_eq!(
        node.fields().into_iter().collect::<Vec<_>>(),
        ["password-pw1", "password-pw2"]
    );

    session.set_input("password-pw1", "hunter2");
    session.set_input("password-pw2", "hunter3");
    let outcomes = node.evaluate().unwrap();
    assert_eq!(outcomes.message("password-pw1"), None);
    assert_eq!(outcomes.message("password-pw2"), Some("Passwords do not match"));
    assert!(!outcomes.contains("pw1"));
}

#[test]
fn unqualified_values_are_not_read() {
    let (session, mut node) = root();
    let module = password_module(&node, Namespace::new("password"));
    node.add_child(module).unwrap();

    session.set_input("pw1", "hunter2");
    session.set_input("pw2", "hunter2");
    let outcomes = node.evaluate().unwrap();
    assert_eq!(outcomes.message("password-pw1"), Some("Required"));
    assert_eq!(outcomes.message("password-pw2"), Some("Required"));
}

#[test]
fn two_instances_do_not_collide() {
    let (session, mut node) = root();
    let signup = password_module(&node, Namespace::new("signup"));
    let change = password_module(&node, Namespace::new("change"));
    node.add_child_labeled(signup, "signup").unwrap();
    node.add_child_labeled(change, "change").unwrap();

    session.set_input("signup-pw1", "a");
    session.set_input("signup-pw2", "a");
    session.set_input("change-pw1", "a");
    session.set_input("change-pw2", "b");

    let outcomes = node.evaluate().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.get("signup-pw2").is_some_and(Option::is_none));
    assert_eq!(outcomes.message("change-pw2"), Some("Passwords do not match"));
}

#[test]
fn nested_namespaces_chain() {
    let (session, mut node) = root();
    let account = Namespace::new("account");

    let mut outer = ValidationNode::from_shared(node.session().clone()).in_namespace(account.clone());
    outer.add_rule("email", email()).unwrap();
    let inner = password_module(&outer, account.child("password"));
    outer.add_child_labeled(inner, "password").unwrap();
    node.add_child_labeled(outer, "account").unwrap();

    assert_eq!(
        node.fields().into_iter().collect::<Vec<_>>(),
        ["account-email", "account-password-pw1", "account-password-pw2"]
    );

    session.set_input("account-email", "not-an-email");
    let outcomes = node.evaluate().unwrap();
    assert_eq!(outcomes.message("account-email"), Some("Not a valid email address"));
    assert_eq!(outcomes.message("account-password-pw1"), Some("Required"));
}

#[test]
fn enabled_module_watches_qualified_names() {
    let (session, mut node) = root();
    let module = password_module(&node, Namespace::new("password"));
    node.add_child(module).unwrap();
    node.enable().unwrap();

    session.set_input("pw1", "x");
    assert!(session.take_changes().is_empty());

    session.set_input("password-pw1", "x");
    assert_eq!(session.take_changes(), ["password-pw1"]);
    assert!(node.handle_change("password-pw1").unwrap());
    assert_eq!(
        session.last_emitted().unwrap().message("password-pw2"),
        Some("Required")
    );
}
