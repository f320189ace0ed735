//! Prelude module for convenient imports.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formcheck_validator::prelude::*;
//!
//! let mut root = ValidationNode::new(MemorySession::new());
//! root.add_rule("age", compose([required(), integer(), gte(18).into()]))?;
//! ```

// ============================================================================
// FOUNDATION: Rules, verdicts, errors
// ============================================================================

pub use crate::foundation::{
    Condition, ConfigurationError, FieldMessage, Namespace, OutcomeMap, Result, Rule, RuleFault,
    RuleOutcome, ValidatorConfig, ValidatorError,
};

// ============================================================================
// TREE & LIFECYCLE
// ============================================================================

pub use crate::lifecycle::LifecycleState;
pub use crate::tree::{NodeId, TreeEvaluator, ValidationNode, merge};

// ============================================================================
// SESSION: Host interface
// ============================================================================

pub use crate::session::{MemorySession, Session, Watch};

// ============================================================================
// CHECK: Prebuilt rules
// ============================================================================

pub use crate::check::{
    Between, Comparison, InSet, TextFormat, between, compose, email, email_with, equal, gt, gte,
    in_set, input_provided, integer, integer_with, lt, lte, not_equal, optional, optional_with,
    regex, required, required_with, url, url_with,
};
