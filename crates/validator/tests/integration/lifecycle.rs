//! Enable/disable behaviour against the in-memory host.

use formcheck_validator::foundation::DEFAULT_PRIORITY;
use formcheck_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::common::{failing, root, sibling_of};

/// Drains pending changes the way a host scheduler would.
fn pump(session: &MemorySession, node: &mut ValidationNode) -> usize {
    let mut recomputed = 0;
    for field in session.take_changes() {
        if node.handle_change(&field).unwrap() {
            recomputed += 1;
        }
    }
    recomputed
}

#[test]
fn enable_evaluates_registers_and_emits() {
    let (session, mut node) = root();
    node.add_rule("name", required()).unwrap();

    node.enable().unwrap();
    assert!(node.is_enabled());
    assert_eq!(node.state(), LifecycleState::Enabled);
    assert_eq!(session.active_watches(), 1);
    assert_eq!(session.watch_priorities(), [DEFAULT_PRIORITY]);
    assert_eq!(
        session.watched_fields().into_iter().collect::<Vec<_>>(),
        ["name"]
    );
    assert_eq!(session.emit_count(), 1);
    assert_eq!(session.last_emitted().unwrap().message("name"), Some("Required"));
}

#[test]
fn enable_twice_is_a_no_op() {
    let (session, mut node) = root();
    node.add_rule("name", required()).unwrap();
    node.enable().unwrap();
    node.enable().unwrap();
    assert_eq!(session.emit_count(), 1);
    assert_eq!(session.active_watches(), 1);
}

#[test]
fn changes_trigger_recompute_while_enabled() {
    let (session, mut node) = root();
    node.add_rule("name", required()).unwrap();
    node.enable().unwrap();

    session.set_input("name", "Ada");
    session.set_input("unrelated", 1);
    assert_eq!(pump(&session, &mut node), 1);
    assert_eq!(session.emit_count(), 2);
    assert!(session.last_emitted().unwrap().is_valid());
}

#[test]
fn disable_emits_all_clear_for_every_field() {
    let (session, mut node) = root();
    node.add_rule("a", failing("A")).unwrap();
    let mut child = sibling_of(&node);
    child.add_rule("b", failing("B")).unwrap();
    node.add_child(child).unwrap();

    node.enable().unwrap();
    assert_eq!(session.last_emitted().unwrap().errors().count(), 2);

    node.disable();
    assert!(!node.is_enabled());
    assert_eq!(session.active_watches(), 0);
    assert_eq!(session.emit_count(), 2);

    let cleared = session.last_emitted().unwrap();
    assert_eq!(cleared, OutcomeMap::all_clear(node.fields()));
    assert_eq!(cleared.len(), 2);
}

#[test]
fn disabled_node_ignores_changes() {
    let (session, mut node) = root();
    node.add_rule("name", required()).unwrap();
    node.enable().unwrap();
    node.disable();

    session.set_input("name", "Ada");
    assert!(session.take_changes().is_empty());
    assert_eq!(node.recompute().unwrap(), None);
    assert!(!node.handle_change("name").unwrap());
    assert_eq!(session.emit_count(), 2);
}

#[test]
fn disable_when_never_enabled_is_silent() {
    let (session, mut node) = root();
    node.add_rule("name", required()).unwrap();
    node.disable();
    assert_eq!(session.emit_count(), 0);
}

#[test]
fn child_enable_is_a_no_op() {
    let (session, mut parent) = root();
    let mut child = sibling_of(&parent);
    child.add_rule("phone", failing("missing")).unwrap();
    parent.add_child_labeled(child, "contact").unwrap();

    let child = parent.child_mut("contact").unwrap();
    assert!(child.is_child());
    child.enable().unwrap();
    assert!(!child.is_enabled());
    child.disable();

    assert_eq!(session.emit_count(), 0);
    assert_eq!(session.active_watches(), 0);
}

#[test]
fn adopting_an_enabled_node_clears_its_output() {
    let (session, mut parent) = root();
    let mut standalone = sibling_of(&parent);
    standalone.add_rule("x", failing("bad")).unwrap();
    standalone.enable().unwrap();
    assert_eq!(session.active_watches(), 1);

    parent.add_child(standalone).unwrap();
    assert_eq!(session.active_watches(), 0);
    assert_eq!(session.emit_count(), 2);
    assert_eq!(session.last_emitted().unwrap(), OutcomeMap::all_clear(["x"]));
}

#[test]
fn registration_follows_tree_growth() {
    let (session, mut parent) = root();
    parent.add_rule("a", required()).unwrap();
    parent.enable().unwrap();

    parent.add_rule("b", required()).unwrap();
    assert_eq!(session.active_watches(), 1);
    assert_eq!(
        session.watched_fields().into_iter().collect::<Vec<_>>(),
        ["a", "b"]
    );

    let mut child = sibling_of(&parent);
    child.add_rule("c", required()).unwrap();
    parent.add_child_labeled(child, "extra").unwrap();
    assert!(session.watched_fields().contains("c"));

    parent
        .child_mut("extra")
        .unwrap()
        .add_rule("d", required())
        .unwrap();
    assert!(!session.watched_fields().contains("d"));

    let outcomes = parent.recompute().unwrap().unwrap();
    assert!(outcomes.contains("d"));
    assert!(session.watched_fields().contains("d"));
    assert_eq!(session.active_watches(), 1);
}

#[test]
fn failed_enable_leaves_node_disabled() {
    let (session, mut node) = root();
    node.add_rule("x", Rule::new(|_: &serde_json::Value| Some("")))
        .unwrap();

    assert!(node.enable().is_err());
    assert!(!node.is_enabled());
    assert_eq!(session.emit_count(), 0);
    assert_eq!(session.active_watches(), 0);
}

#[test]
fn dropping_an_enabled_node_releases_its_registration() {
    let (session, mut node) = root();
    node.add_rule("x", required()).unwrap();
    node.enable().unwrap();
    assert_eq!(session.active_watches(), 1);

    drop(node);
    assert_eq!(session.active_watches(), 0);
}

#[test]
fn priority_comes_from_config() {
    formcheck_log::init_test();
    let session = MemorySession::new();
    let config = ValidatorConfig {
        priority: 5,
        verbose: true,
    };
    let mut node = ValidationNode::new(session.clone()).with_config(config);
    node.add_rule("x", required()).unwrap();
    node.enable().unwrap();

    assert_eq!(session.watch_priorities(), [5]);
    assert_eq!(node.config().priority, 5);
}
