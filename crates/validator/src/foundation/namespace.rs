//! Field name scoping
//!
//! Fields are named by their owner. A node living inside a reusable form
//! module qualifies its field ids with the module's namespace, so two
//! instances of the same module never collide in the shared outcome map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between namespace segments and the field id.
pub const SEPARATOR: &str = "-";

/// Scope that qualifies field ids.
///
/// The root namespace leaves ids untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Option<String>);

impl Namespace {
    /// The unscoped namespace.
    pub const fn root() -> Self {
        Self(None)
    }

    /// A top-level namespace. A blank id yields the root namespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() { Self(None) } else { Self(Some(id)) }
    }

    /// Qualifies a field id with this namespace.
    pub fn qualify(&self, id: &str) -> String {
        match &self.0 {
            Some(prefix) => format!("{prefix}{SEPARATOR}{id}"),
            None => id.to_owned(),
        }
    }

    /// Nested namespace one level below this one.
    #[must_use]
    pub fn child(&self, id: &str) -> Self {
        Self::new(self.qualify(id))
    }

    pub fn prefix(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().unwrap_or(""))
    }
}
