//! Campus code / campus id resolution.
//!
//! Virtual records are hosted by another campus of a shared consortium. Keys
//! and URLs name that campus with a short code (`@abc`), database ids with a
//! numeric campus id. Mapping one to the other needs a lookup outside this
//! crate, so it sits behind the asynchronous [`CampusResolver`] trait.
//!
//! [`InMemoryCampusResolver`] is provided for tests and for deployments with a
//! fixed, known set of campuses.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ResolveError;

/// Resolver interface between campus codes and campus ids.
#[async_trait]
pub trait CampusResolver: Send + Sync {
    /// Look up the numeric campus id for a campus code.
    async fn resolve_campus_id_from_code(&self, campus_code: &str) -> Result<u16, ResolveError>;

    /// Look up the campus code for a numeric campus id.
    async fn resolve_campus_code_from_id(&self, campus_id: u16) -> Result<String, ResolveError>;
}

/// Resolver backed by a fixed table of campuses.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCampusResolver {
    ids_by_code: HashMap<String, u16>,
    codes_by_id: HashMap<u16, String>,
}

impl InMemoryCampusResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a campus, replacing any earlier entry for the code or the id.
    #[must_use]
    pub fn with_campus(mut self, campus_code: impl Into<String>, campus_id: u16) -> Self {
        self.insert(campus_code, campus_id);
        self
    }

    /// Register a campus, replacing any earlier entry for the code or the id.
    pub fn insert(&mut self, campus_code: impl Into<String>, campus_id: u16) {
        let campus_code = campus_code.into();
        if let Some(old_id) = self.ids_by_code.remove(&campus_code) {
            self.codes_by_id.remove(&old_id);
        }
        if let Some(old_code) = self.codes_by_id.remove(&campus_id) {
            self.ids_by_code.remove(&old_code);
        }
        self.ids_by_code.insert(campus_code.clone(), campus_id);
        self.codes_by_id.insert(campus_id, campus_code);
    }

    /// Number of registered campuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes_by_id.len()
    }

    /// No campuses registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes_by_id.is_empty()
    }
}

#[async_trait]
impl CampusResolver for InMemoryCampusResolver {
    async fn resolve_campus_id_from_code(&self, campus_code: &str) -> Result<u16, ResolveError> {
        self.ids_by_code
            .get(campus_code)
            .copied()
            .ok_or_else(|| format!("unknown campus code: {campus_code}").into())
    }

    async fn resolve_campus_code_from_id(&self, campus_id: u16) -> Result<String, ResolveError> {
        self.codes_by_id
            .get(&campus_id)
            .cloned()
            .ok_or_else(|| format!("unknown campus id: {campus_id}").into())
    }
}
