//! In-process session

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;
use serde_json::Value;

use super::{Session, Watch};
use crate::foundation::OutcomeMap;

#[derive(Debug, Default)]
struct State {
    values: IndexMap<String, Value>,
    watches: IndexMap<u64, (IndexSet<String>, i32)>,
    next_watch: u64,
    pending: IndexSet<String>,
    emitted: Vec<OutcomeMap>,
}

impl State {
    fn is_watched(&self, field: &str) -> bool {
        self.watches.values().any(|(fields, _)| fields.contains(field))
    }
}

/// Session backed by a shared in-memory value store.
///
/// Clones share state, so a test can keep one handle while the validation tree
/// owns another. Changes to watched fields are queued (once per field until
/// drained with [`take_changes`](Self::take_changes)); every emitted outcome
/// map is recorded.
///
/// # Examples
///
/// ```rust,ignore
/// let session = MemorySession::new();
/// let mut root = ValidationNode::new(session.clone());
/// root.add_rule("name", required())?;
/// root.enable()?;
///
/// session.set_input("name", "Ada");
/// for field in session.take_changes() {
///     root.handle_change(&field)?;
/// }
/// assert!(session.last_emitted().unwrap().is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    inner: Arc<Mutex<State>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value.
    #[must_use]
    pub fn with_input(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.lock().values.insert(field.into(), value.into());
        self
    }

    /// Stores a value. Queues a change notification when the field is watched.
    pub fn set_input(&self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let mut state = self.inner.lock();
        if state.is_watched(&field) {
            state.pending.insert(field.clone());
        }
        state.values.insert(field, value.into());
    }

    /// Forgets a value. Queues a change notification when the field is watched.
    pub fn remove_input(&self, field: &str) -> Option<Value> {
        let mut state = self.inner.lock();
        let removed = state.values.shift_remove(field);
        if removed.is_some() && state.is_watched(field) {
            state.pending.insert(field.to_owned());
        }
        removed
    }

    /// Drains queued change notifications in the order they first occurred.
    pub fn take_changes(&self) -> Vec<String> {
        self.inner.lock().pending.drain(..).collect()
    }

    /// Every outcome map sent so far.
    pub fn emitted(&self) -> Vec<OutcomeMap> {
        self.inner.lock().emitted.clone()
    }

    pub fn last_emitted(&self) -> Option<OutcomeMap> {
        self.inner.lock().emitted.last().cloned()
    }

    pub fn emit_count(&self) -> usize {
        self.inner.lock().emitted.len()
    }

    /// Number of registrations not yet released.
    pub fn active_watches(&self) -> usize {
        self.inner.lock().watches.len()
    }

    /// Union of all fields currently watched.
    pub fn watched_fields(&self) -> IndexSet<String> {
        let state = self.inner.lock();
        state
            .watches
            .values()
            .flat_map(|(fields, _)| fields.iter().cloned())
            .collect()
    }

    /// Priorities of the registrations not yet released, oldest first.
    pub fn watch_priorities(&self) -> Vec<i32> {
        self.inner.lock().watches.values().map(|(_, p)| *p).collect()
    }
}

impl Session for MemorySession {
    fn input(&self, field: &str) -> Value {
        self.inner
            .lock()
            .values
            .get(field)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn watch(&self, fields: &IndexSet<String>, priority: i32) -> Watch {
        let id = {
            let mut state = self.inner.lock();
            let id = state.next_watch;
            state.next_watch += 1;
            state.watches.insert(id, (fields.clone(), priority));
            id
        };
        tracing::trace!(watch = id, fields = fields.len(), priority, "watch registered");

        let inner = Arc::clone(&self.inner);
        Watch::new(fields.clone(), priority, move || {
            inner.lock().watches.shift_remove(&id);
            tracing::trace!(watch = id, "watch released");
        })
    }

    fn send_outcomes(&self, outcomes: &OutcomeMap) {
        self.inner.lock().emitted.push(outcomes.clone());
    }
}
