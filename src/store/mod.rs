//! Document-store abstraction
//!
//! Resources persist through the [`Collection`] trait so services stay
//! agnostic to the backing store. The crate ships the in-memory backend
//! ([`MemoryCollection`]); the filter model in [`filter`] is the single
//! query language shared by every list endpoint.

pub mod filter;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::core::field::FieldValue;
pub use filter::{Filter, text_search};
pub use memory::MemoryCollection;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection lock poisoned")]
    LockPoisoned,
}

/// A record that can live in a [`Collection`].
///
/// Documents expose their fields by name so the filter evaluator can match
/// them without knowing the concrete type. Unknown field names return
/// [`FieldValue::Null`].
pub trait Document: Clone + Send + Sync + 'static {
    /// Unique identifier of this document
    fn id(&self) -> Uuid;

    /// Creation timestamp, used for newest-first ordering
    fn created_at(&self) -> DateTime<Utc>;

    /// Look up a field value by name
    fn field(&self, name: &str) -> FieldValue;
}

/// Options applied when fetching a page of documents
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Sort by `created_at` descending before skip/limit
    pub sort_newest_first: bool,

    /// Number of matching documents to skip
    pub skip: usize,

    /// Maximum number of documents to return
    pub limit: Option<usize>,
}

impl FindOptions {
    /// Newest-first page fetch: skip `(page - 1) * limit`, take `limit`
    pub fn page(skip: usize, limit: usize) -> Self {
        Self {
            sort_newest_first: true,
            skip,
            limit: Some(limit),
        }
    }
}

/// One-shot mutation applied to a single matching document
pub type MutateOne<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Mutation applied to every matching document
pub type MutateMany<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// Storage contract for a single document type.
///
/// The backing store is free to order `find_one`/`update_one` matches
/// arbitrarily when several documents satisfy the filter; callers that need
/// a specific record filter by id.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    /// Insert a new document
    async fn insert(&self, doc: T) -> Result<T, StoreError>;

    /// Find the first document matching the filter
    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, StoreError>;

    /// Find all documents matching the filter, honoring sort/skip/limit
    async fn find(&self, filter: &Filter, options: FindOptions) -> Result<Vec<T>, StoreError>;

    /// Count documents matching the filter
    async fn count(&self, filter: &Filter) -> Result<usize, StoreError>;

    /// Mutate the first matching document, returning the updated copy
    async fn update_one(&self, filter: &Filter, mutate: MutateOne<T>)
    -> Result<Option<T>, StoreError>;

    /// Mutate every matching document, returning how many were touched
    async fn update_many(&self, filter: &Filter, mutate: MutateMany<T>)
    -> Result<usize, StoreError>;
}
