//! # formcheck-validator
//!
//! Declarative, hierarchical validation of named input fields.
//!
//! A [`ValidationNode`](tree::ValidationNode) holds ordered rules per field
//! and owns child nodes. Evaluating a node walks the whole subtree and
//! produces one flat [`OutcomeMap`](foundation::OutcomeMap): qualified field
//! name to `None` (valid) or a message. An enabled root pushes a fresh map to
//! its host [`Session`](session::Session) on every relevant change and an
//! all-clear map when disabled.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formcheck_validator::prelude::*;
//!
//! let session = MemorySession::new().with_input("email", "bad");
//! let mut root = ValidationNode::new(session.clone());
//! root.add_rule("email", required())?
//!     .add_rule("email", email())?;
//!
//! let outcomes = root.evaluate()?;
//! assert_eq!(outcomes.message("email"), Some("Not a valid email address"));
//! ```
//!
//! ## Rules
//!
//! A rule answers [`Pass`](foundation::RuleOutcome::Pass),
//! [`Skip`](foundation::RuleOutcome::Skip) or
//! [`Fail`](foundation::RuleOutcome::Fail). The first `Skip` or `Fail` is
//! final for the field. A rule that faults never aborts evaluation: its field
//! reports a diagnostic message instead. Prebuilt rules live in [`check`].
//!
//! ## Modules
//!
//! - [`foundation`]: rules, verdicts, namespaces, settings and errors
//! - [`tree`]: nodes, the evaluator and the merger
//! - [`lifecycle`]: enable/disable states
//! - [`session`]: host interface and the in-memory host
//! - [`check`]: prebuilt rules

pub mod check;
pub mod foundation;
pub mod lifecycle;
pub mod prelude;
pub mod session;
pub mod tree;
