//! Validation node: one validator scope

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::evaluate::TreeEvaluator;
use crate::foundation::{
    Condition, ConfigurationError, Namespace, OutcomeMap, Result, Rule, ValidatorConfig,
};
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::session::Session;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a node, shown as `validator-<n>`.
///
/// Used as the default label when a node is attached to a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validator-{}", self.0)
    }
}

/// A validator scope: field rules, owned child scopes, an optional gating
/// condition and an enable/disable lifecycle.
///
/// Only a root node emits outcome maps to its [`Session`]. A node attached
/// with [`add_child`](Self::add_child) folds its results into the parent and
/// ignores [`enable`](Self::enable).
///
/// # Examples
///
/// ```rust,ignore
/// use formcheck_validator::prelude::*;
///
/// let session = MemorySession::new();
/// let mut root = ValidationNode::new(session.clone());
/// root.add_rule("email", required())?
///     .add_rule("email", email())?;
///
/// let mut contact = ValidationNode::from_shared(root.session().clone());
/// contact.add_rule("phone", required_with("missing", input_provided))?;
/// root.add_child_labeled(contact, "contact")?;
///
/// root.enable()?; // evaluates, registers for changes and emits
/// ```
pub struct ValidationNode {
    id: NodeId,
    session: Arc<dyn Session>,
    namespace: Namespace,
    config: ValidatorConfig,
    rules: IndexMap<String, Vec<Rule>>,
    children: IndexMap<String, ValidationNode>,
    condition: Option<Condition>,
    lifecycle: Lifecycle,
}

impl ValidationNode {
    /// Creates a root node in the unscoped namespace.
    pub fn new(session: impl Session + 'static) -> Self {
        Self::from_shared(Arc::new(session))
    }

    /// Creates a root node that shares an existing session handle.
    pub fn from_shared(session: Arc<dyn Session>) -> Self {
        Self {
            id: NodeId::next(),
            session,
            namespace: Namespace::root(),
            config: ValidatorConfig::default(),
            rules: IndexMap::new(),
            children: IndexMap::new(),
            condition: None,
            lifecycle: Lifecycle::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Scopes this node's own field names to `namespace`.
    #[must_use]
    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Appends `rule` to the rule list of `field`.
    ///
    /// `field` is the unqualified id; the node's namespace is applied when
    /// values are read and outcomes reported.
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<Rule>,
    ) -> Result<&mut Self, ConfigurationError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ConfigurationError::EmptyFieldName);
        }

        self.rules.entry(field).or_default().push(rule.into());
        self.refresh_watch();
        Ok(self)
    }

    /// Attaches `child` under its own id as label.
    pub fn add_child(&mut self, child: Self) -> Result<&mut Self, ConfigurationError> {
        let label = child.id.to_string();
        self.attach(child, label)
    }

    /// Attaches `child` under `label`.
    ///
    /// The child is disabled first, clearing anything it emitted as a
    /// standalone root, and then becomes a non-emitting child. On error the
    /// child is dropped and the tree is unchanged.
    pub fn add_child_labeled(
        &mut self,
        child: Self,
        label: impl Into<String>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.attach(child, label.into())
    }

    fn attach(&mut self, mut child: Self, label: String) -> Result<&mut Self, ConfigurationError> {
        if label.trim().is_empty() {
            return Err(ConfigurationError::EmptyChildLabel);
        }
        if self.children.contains_key(&label) {
            return Err(ConfigurationError::DuplicateChildLabel { label });
        }

        child.disable();
        child.lifecycle.mark_child();
        tracing::debug!(parent = %self.id, child = %child.id, %label, "child validator attached");

        self.children.insert(label, child);
        self.refresh_watch();
        Ok(self)
    }

    /// Replaces the gating condition. `None` means always evaluate.
    pub fn set_condition(&mut self, condition: Option<Condition>) -> &mut Self {
        self.condition = condition;
        self
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Own rules keyed by unqualified field id.
    pub fn rules(&self) -> &IndexMap<String, Vec<Rule>> {
        &self.rules
    }

    /// Children keyed by label, in insertion order.
    pub fn children(&self) -> &IndexMap<String, Self> {
        &self.children
    }

    pub fn child(&self, label: &str) -> Option<&Self> {
        self.children.get(label)
    }

    /// Mutable access to a child.
    ///
    /// Fields added through this handle are picked up by the root's next
    /// [`recompute`](Self::recompute).
    pub fn child_mut(&mut self, label: &str) -> Option<&mut Self> {
        self.children.get_mut(label)
    }

    /// Qualified names of every field reachable from this node, own fields
    /// first, each name once.
    pub fn fields(&self) -> IndexSet<String> {
        let mut fields: IndexSet<String> = self
            .rules
            .keys()
            .map(|field| self.namespace.qualify(field))
            .collect();
        for child in self.children.values() {
            fields.extend(child.fields());
        }
        fields
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_enabled(&self) -> bool {
        self.state() == LifecycleState::Enabled
    }

    pub fn is_child(&self) -> bool {
        self.lifecycle.is_child()
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Evaluates the whole subtree once.
    pub fn evaluate(&self) -> Result<OutcomeMap> {
        TreeEvaluator::new()
            .verbose(self.config.verbose)
            .evaluate(self)
    }

    /// Evaluates once and reports whether every field is valid.
    pub fn is_valid(&self) -> Result<bool> {
        Ok(self.evaluate()?.is_valid())
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Starts emitting.
    ///
    /// Does nothing for a child or an already enabled node. Otherwise
    /// evaluates once, registers for changes to [`fields`](Self::fields) and
    /// sends the outcome map to the session. If evaluation fails the node
    /// stays disabled and nothing is sent.
    pub fn enable(&mut self) -> Result<()> {
        if self.lifecycle.is_child() {
            tracing::debug!(node = %self.id, "enable ignored on child validator");
            return Ok(());
        }
        if !self.lifecycle.can_enable() {
            return Ok(());
        }

        let outcomes = self.evaluate()?;
        let fields = self.fields();
        let watch = self.session.watch(&fields, self.config.priority);
        self.lifecycle.enter_enabled(watch);
        self.session.send_outcomes(&outcomes);

        tracing::debug!(
            node = %self.id,
            fields = fields.len(),
            errors = outcomes.errors().count(),
            "validator enabled"
        );
        Ok(())
    }

    /// Stops emitting.
    ///
    /// Does nothing for a child or a node that is not enabled. Otherwise
    /// releases the change registration and sends one map with every field
    /// cleared.
    pub fn disable(&mut self) {
        if self.lifecycle.is_child() || !self.lifecycle.enter_disabled() {
            return;
        }

        let cleared = OutcomeMap::all_clear(self.fields());
        self.session.send_outcomes(&cleared);
        tracing::debug!(node = %self.id, fields = cleared.len(), "validator disabled");
    }

    /// Host entry point after a field change.
    ///
    /// When enabled: evaluates, re-registers if the reachable field set has
    /// changed, emits and returns the map. When disabled: returns `None`
    /// without evaluating.
    pub fn recompute(&mut self) -> Result<Option<OutcomeMap>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let outcomes = self.evaluate()?;
        self.refresh_watch();
        self.session.send_outcomes(&outcomes);
        Ok(Some(outcomes))
    }

    /// Recomputes when enabled and `field` belongs to the tree.
    ///
    /// Returns whether a recomputation happened.
    pub fn handle_change(&mut self, field: &str) -> Result<bool> {
        if !self.is_enabled() || !self.fields().contains(field) {
            return Ok(false);
        }
        self.recompute()?;
        Ok(true)
    }

    fn refresh_watch(&mut self) {
        let Some(current) = self.lifecycle.watch() else {
            return;
        };
        let fields = self.fields();
        if current.fields() == &fields {
            return;
        }

        tracing::debug!(node = %self.id, fields = fields.len(), "refreshing change registration");
        let watch = self.session.watch(&fields, self.config.priority);
        self.lifecycle.replace_watch(watch);
    }
}

impl fmt::Debug for ValidationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationNode")
            .field("id", &self.id)
            .field("namespace", &self.namespace)
            .field("rules", &self.rules)
            .field("children", &self.children)
            .field("conditional", &self.condition.is_some())
            .field("state", &self.state())
            .field("is_child", &self.is_child())
            .finish_non_exhaustive()
    }
}
