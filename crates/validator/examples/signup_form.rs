//! Signup form example for formcheck-validator
//!
//! Builds a small validation tree, enables it against an in-memory session
//! and prints every outcome map the session receives.

use formcheck_validator::prelude::*;
use serde_json::Value;

fn password_module(session: std::sync::Arc<dyn Session>, namespace: Namespace) -> Result<ValidationNode> {
    let first = namespace.qualify("pw1");
    let reader = session.clone();
    let matches = Rule::new(move |value: &Value| {
        if *value == reader.input(&first) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("Passwords do not match")
        }
    })
    .with_label("matches_pw1");

    let mut module = ValidationNode::from_shared(session).in_namespace(namespace);
    module
        .add_rule("pw1", required())?
        .add_rule("pw1", regex(".{8,}", "At least 8 characters", false)?)?
        .add_rule("pw2", required())?
        .add_rule("pw2", matches)?;
    Ok(module)
}

fn pump(session: &MemorySession, form: &mut ValidationNode) -> Result<()> {
    for field in session.take_changes() {
        form.handle_change(&field)?;
    }
    Ok(())
}

fn show(session: &MemorySession) {
    if let Some(outcomes) = session.last_emitted() {
        match serde_json::to_string_pretty(&outcomes) {
            Ok(json) => println!("{json}\n"),
            Err(e) => println!("✗ could not render outcomes: {e}"),
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    formcheck_log::init(formcheck_log::Config::development())?;

    // FORMCHECK_VERBOSE=1 traces every rule verdict.
    let config = ValidatorConfig::from_env();
    let session = MemorySession::new();
    let mut form = ValidationNode::new(session.clone()).with_config(config);
    form.add_rule("email", required())?
        .add_rule("email", email())?
        .add_rule("age", optional())?
        .add_rule("age", compose([integer(), gte(18).into()]))?
        .add_rule("plan", in_set(["free", "pro", "team"]))?;

    let password = password_module(form.session().clone(), Namespace::new("password"))?;
    form.add_child_labeled(password, "password")?;

    println!("Initial state:");
    form.enable()?;
    show(&session);

    println!("After typing an invalid email and a short password:");
    session.set_input("email", "ada@");
    session.set_input("password-pw1", "short");
    pump(&session, &mut form)?;
    show(&session);

    println!("After fixing everything:");
    session.set_input("email", "ada@example.com");
    session.set_input("age", 36);
    session.set_input("plan", "pro");
    session.set_input("password-pw1", "correct horse");
    session.set_input("password-pw2", "correct horse");
    pump(&session, &mut form)?;
    show(&session);

    println!("After disabling:");
    form.disable();
    show(&session);

    println!("✓ {} outcome maps emitted", session.emit_count());
    Ok(())
}
