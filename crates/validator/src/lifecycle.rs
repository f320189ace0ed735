//! Enable/disable state machine of an emitting root
//!
//! A root is either [`Disabled`](LifecycleState::Disabled) or
//! [`Enabled`](LifecycleState::Enabled). While enabled it holds the
//! [`Watch`] obtained from its host; leaving the enabled state releases that
//! watch exactly once. Child nodes never leave the disabled state.

use serde::Serialize;

use crate::session::Watch;

/// Observable lifecycle state of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Disabled,
    Enabled,
}

#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    watch: Option<Watch>,
    is_child: bool,
}

impl Lifecycle {
    pub(crate) fn state(&self) -> LifecycleState {
        if self.watch.is_some() {
            LifecycleState::Enabled
        } else {
            LifecycleState::Disabled
        }
    }

    pub(crate) fn is_child(&self) -> bool {
        self.is_child
    }

    pub(crate) fn mark_child(&mut self) {
        debug_assert!(self.watch.is_none(), "child marked while enabled");
        self.is_child = true;
    }

    /// `true` when an `enable()` call would change state.
    pub(crate) fn can_enable(&self) -> bool {
        !self.is_child && self.watch.is_none()
    }

    pub(crate) fn watch(&self) -> Option<&Watch> {
        self.watch.as_ref()
    }

    pub(crate) fn enter_enabled(&mut self, watch: Watch) {
        debug_assert!(self.can_enable());
        self.watch = Some(watch);
    }

    /// Swaps the registration of an enabled node; the new one is taken before
    /// the old one is released.
    pub(crate) fn replace_watch(&mut self, watch: Watch) {
        if let Some(old) = self.watch.replace(watch) {
            old.release();
        }
    }

    /// Releases the watch. Returns `false` when the node was not enabled.
    pub(crate) fn enter_disabled(&mut self) -> bool {
        match self.watch.take() {
            Some(watch) => {
                watch.release();
                true
            }
            None => false,
        }
    }
}
