//! The parameter store seam.
//!
//! Everything the settings operations need from a remote hierarchical
//! key-value store: a recursive prefix listing with continuation tokens, an
//! unconditional or non-overwriting put, and a delete that reports missing
//! keys as [`StoreError::NotFound`].

use std::sync::Arc;

use async_trait::async_trait;
use stackconf_shared::{Page, Parameter, StoreError};

/// Abstraction over parameter store backends.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// List one page of parameters whose names start with `path`.
    ///
    /// `next_token` is `None` for the first page and otherwise the token the
    /// previous page returned.
    async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>, StoreError>;

    /// Store `value` as a plain string under `name`.
    ///
    /// With `overwrite == false` an existing parameter is an error
    /// ([`StoreError::AlreadyExists`]).
    async fn put(&self, name: &str, value: &str, overwrite: bool) -> Result<(), StoreError>;

    /// Delete the parameter `name`, failing with [`StoreError::NotFound`] if absent.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ParameterStore + ?Sized> ParameterStore for Arc<S> {
    async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>, StoreError> {
        (**self).list_by_path(path, recursive, next_token).await
    }

    async fn put(&self, name: &str, value: &str, overwrite: bool) -> Result<(), StoreError> {
        (**self).put(name, value, overwrite).await
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        (**self).delete(name).await
    }
}
