//! Host runtime interface
//!
//! A validation tree does not own field values or know how changes are
//! delivered. It talks to its host through [`Session`]:
//!
//! - **Value source**: [`Session::input`] is read synchronously during
//!   evaluation; nothing is cached between passes.
//! - **Change notification**: [`Session::watch`] registers an enabled root for
//!   changes to a set of fields. The host calls back into the root
//!   ([`ValidationNode::recompute`](crate::tree::ValidationNode::recompute))
//!   when any of them change.
//! - **Outcome sink**: [`Session::send_outcomes`] receives every outcome map an
//!   enabled root emits.
//!
//! [`MemorySession`] is an in-process host for tests, demos and batch use.

mod memory;

pub use memory::MemorySession;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use serde_json::Value;

use crate::foundation::OutcomeMap;

/// Connection between a validation tree and its host runtime.
pub trait Session: Send + Sync {
    /// Current value of a qualified field, `Value::Null` when unknown.
    fn input(&self, field: &str) -> Value;

    /// Registers interest in changes to `fields`.
    ///
    /// The registration lasts until the returned [`Watch`] is released or
    /// dropped.
    fn watch(&self, fields: &IndexSet<String>, priority: i32) -> Watch;

    /// Delivers an outcome map to the display layer.
    fn send_outcomes(&self, outcomes: &OutcomeMap);
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn input(&self, field: &str) -> Value {
        (**self).input(field)
    }

    fn watch(&self, fields: &IndexSet<String>, priority: i32) -> Watch {
        (**self).watch(fields, priority)
    }

    fn send_outcomes(&self, outcomes: &OutcomeMap) {
        (**self).send_outcomes(outcomes);
    }
}

// ============================================================================
// WATCH
// ============================================================================

type ReleaseFn = Box<dyn FnOnce() + Send + Sync>;

/// Standing change-notification registration.
///
/// Releasing happens exactly once: either through [`Watch::release`] or when
/// the handle is dropped.
pub struct Watch {
    fields: IndexSet<String>,
    priority: i32,
    release: Option<ReleaseFn>,
}

impl Watch {
    /// Registration that runs `release` when it ends.
    pub fn new<F>(fields: IndexSet<String>, priority: i32, release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            fields,
            priority,
            release: Some(Box::new(release)),
        }
    }

    pub fn fields(&self) -> &IndexSet<String> {
        &self.fields
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// `true` when changes to `field` are observed by this registration.
    pub fn covers(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Ends the registration.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch")
            .field("fields", &self.fields)
            .field("priority", &self.priority)
            .field("released", &self.release.is_none())
            .finish()
    }
}
