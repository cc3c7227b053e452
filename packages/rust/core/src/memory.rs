//! In-memory parameter store (for testing).
//!
//! Mirrors the semantics the settings layer relies on: names are listed in
//! sorted order, a page holds at most `page_size` entries, and the
//! continuation token is the last name returned.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use stackconf_shared::{Page, Parameter, StoreError};
use tokio::sync::RwLock;

use crate::store::ParameterStore;

/// Default number of entries per listing page.
const DEFAULT_PAGE_SIZE: usize = 10;

/// In-memory parameter store.
pub struct MemoryStore {
    parameters: RwLock<BTreeMap<String, String>>,
    page_size: usize,
}

impl MemoryStore {
    /// Create an empty store with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty store that returns at most `page_size` entries per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            parameters: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
        }
    }

    /// Current value of `name`, if stored.
    pub async fn get(&self, name: &str) -> Option<String> {
        self.parameters.read().await.get(name).cloned()
    }

    /// Number of stored parameters.
    pub async fn len(&self) -> usize {
        self.parameters.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParameterStore for MemoryStore {
    async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>, StoreError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let parameters = self.parameters.read().await;

        let start = match next_token {
            Some(token) => Bound::Excluded(token),
            None => Bound::Included(prefix.clone()),
        };

        let mut matching = parameters
            .range((start, Bound::Unbounded))
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| recursive || !name[prefix.len()..].contains('/'));

        let items: Vec<Parameter> = matching
            .by_ref()
            .take(self.page_size)
            .map(|(name, value)| Parameter::new(name.as_str(), value.as_str()))
            .collect();

        let next_token = match matching.next() {
            Some(_) => items.last().map(|p| p.name.clone()),
            None => None,
        };

        Ok(Page { items, next_token })
    }

    async fn put(&self, name: &str, value: &str, overwrite: bool) -> Result<(), StoreError> {
        let mut parameters = self.parameters.write().await;
        if !overwrite && parameters.contains_key(name) {
            return Err(StoreError::AlreadyExists { name: name.into() });
        }
        parameters.insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut parameters = self.parameters.write().await;
        match parameters.remove(name) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { name: name.into() }),
        }
    }
}
