//! Recursive evaluation of a validation tree
//!
//! For every node, leaves first:
//!
//! 1. Children are evaluated in insertion order and merged into an
//!    accumulator.
//! 2. If the node's condition is set and false, each of its own fields is
//!    recorded as valid without reading its value.
//! 3. Otherwise each own field's rules run front to back until one returns
//!    [`RuleOutcome::Skip`] or [`RuleOutcome::Fail`].
//! 4. Own results are merged last, so an own message replaces a child's but
//!    an own clear never hides it.
//!
//! A rule fault (an `Err` from a fallible rule or a panic) becomes a field
//! message and evaluation continues. A failure with a blank message breaks the
//! outcome contract and aborts evaluation with
//! [`ValidatorError::InvalidRuleResult`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use super::merge::merge;
use super::node::ValidationNode;
use crate::foundation::{
    FieldMessage, OutcomeMap, Result, Rule, RuleFault, RuleOutcome, ValidatorError,
};

/// Walks a [`ValidationNode`] and its descendants into one [`OutcomeMap`].
///
/// Evaluation only reads the tree; it is synchronous and always terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEvaluator {
    verbose: bool,
}

impl TreeEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a debug event for every node visit and rule verdict.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn evaluate(&self, node: &ValidationNode) -> Result<OutcomeMap> {
        self.visit(node, 0)
    }

    fn visit(&self, node: &ValidationNode, depth: usize) -> Result<OutcomeMap> {
        let gated = node.condition().is_some_and(|c| !c.holds());
        if self.verbose {
            tracing::debug!(
                node = %node.id(),
                depth,
                gated,
                children = node.children().len(),
                "evaluating validator"
            );
        }

        let mut accumulated = OutcomeMap::new();
        for child in node.children().values() {
            accumulated = merge(accumulated, self.visit(child, depth + 1)?);
        }

        let mut own = OutcomeMap::new();
        for (field, rules) in node.rules() {
            let qualified = node.namespace().qualify(field);
            let verdict = if gated {
                None
            } else {
                let value = node.session().input(&qualified);
                self.run_rules(&qualified, rules, &value)?
            };
            own.insert(qualified, verdict);
        }

        Ok(merge(accumulated, own))
    }

    fn run_rules(
        &self,
        field: &str,
        rules: &[Rule],
        value: &Value,
    ) -> Result<Option<FieldMessage>> {
        for rule in rules {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| rule.apply(value))) {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(fault)) => fault_outcome(field, rule, &fault),
                Err(payload) => {
                    let fault = RuleFault::new(panic_description(payload.as_ref()));
                    fault_outcome(field, rule, &fault)
                }
            };

            if self.verbose {
                tracing::debug!(field, rule = rule.label(), outcome = ?outcome, "rule verdict");
            }

            match outcome {
                RuleOutcome::Pass => {}
                RuleOutcome::Skip => return Ok(None),
                RuleOutcome::Fail(message) if message.message.trim().is_empty() => {
                    return Err(ValidatorError::InvalidRuleResult {
                        field: field.to_owned(),
                        rule: rule.label().to_owned(),
                        reason: "failure message is blank".to_owned(),
                    });
                }
                RuleOutcome::Fail(message) => return Ok(Some(message)),
            }
        }
        Ok(None)
    }
}

fn fault_outcome(field: &str, rule: &Rule, fault: &RuleFault) -> RuleOutcome {
    tracing::warn!(field, rule = rule.label(), error = %fault, "rule faulted during validation");
    RuleOutcome::fail(fault.field_message())
}

fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_owned()
    }
}
