//! Canonical parameter paths: `/<application>/<scope>[/<context>[/<property>]]`.

use std::sync::LazyLock;

use regex::Regex;
use stackconf_shared::{Result, SettingsError};

/// A single path segment: letters, digits, `_`, `.`, `-`; never empty.
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid segment regex"));

/// The typed components of a parameter path.
///
/// `property` is only meaningful together with `context`; [`build_path`]
/// rejects the combination of a property without a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegments<'a> {
    pub application: &'a str,
    pub scope: &'a str,
    pub context: Option<&'a str>,
    pub property: Option<&'a str>,
}

impl<'a> PathSegments<'a> {
    /// Application + scope, the shortest valid path.
    pub fn new(application: &'a str, scope: &'a str) -> Self {
        Self {
            application,
            scope,
            context: None,
            property: None,
        }
    }

    pub fn with_context(mut self, context: &'a str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_property(mut self, property: &'a str) -> Self {
        self.property = Some(property);
        self
    }
}

/// Whether `value` is usable as a path segment.
pub fn is_valid_segment(value: &str) -> bool {
    SEGMENT_RE.is_match(value)
}

fn check(field: &'static str, value: &str) -> Result<()> {
    if is_valid_segment(value) {
        Ok(())
    } else {
        Err(SettingsError::validation(field, value))
    }
}

/// Validate the segments and join them into a fully qualified path.
///
/// Pure: no I/O happens here, so invalid input never reaches the store.
pub fn build_path(segments: &PathSegments<'_>) -> Result<String> {
    check("application", segments.application)?;
    check("scope", segments.scope)?;

    let mut parts = vec![segments.application, segments.scope];

    if let Some(context) = segments.context {
        check("context", context)?;
        parts.push(context);
    }

    if let Some(property) = segments.property {
        if segments.context.is_none() {
            return Err(SettingsError::MissingContext);
        }
        check("property", property)?;
        parts.push(property);
    }

    Ok(format!("/{}", parts.join("/")))
}
