//! The validation tree: nodes, evaluation and merging
//!
//! - [`ValidationNode`]: one validator scope with rules, children, a gating
//!   condition and a lifecycle.
//! - [`TreeEvaluator`]: folds a node and its descendants into one
//!   [`OutcomeMap`](crate::foundation::OutcomeMap).
//! - [`merge`]: combines two outcome maps without losing messages.

mod evaluate;
mod merge;
mod node;

pub use evaluate::TreeEvaluator;
pub use merge::merge;
pub use node::{NodeId, ValidationNode};
