//! Core domain types exchanged with the parameter store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A settings group: local property name → value, with the prefix stripped.
pub type Settings = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

/// One stored entry as returned by a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Fully qualified name, e.g. `/my-app/stack/prod/apiEndpoint`.
    pub name: String,
    /// Stored value. Some stores may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Parameter {
    /// Convenience constructor for an entry with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A single page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Opaque continuation token. `None` (or empty) ends the listing.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Well-known second-level path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// Settings owned by the deployment stack itself.
    Stack,
    /// Credentials and endpoints of third-party services.
    ThirdParty,
}

impl Scope {
    /// The path segment for this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::ThirdParty => "thirdParty",
        }
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
