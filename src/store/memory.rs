//! In-memory collection backend
//!
//! Thread-safe via `RwLock`. No transaction spans a find and a subsequent
//! insert: caller-side uniqueness checks are check-then-act, and two
//! concurrent writers can both pass the same check.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::store::filter::Filter;
use crate::store::{Collection, Document, FindOptions, MutateMany, MutateOne, StoreError};

/// In-memory document collection
#[derive(Clone)]
pub struct MemoryCollection<T> {
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> MemoryCollection<T> {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MemoryCollection<T> {
    fn matching(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs
            .values()
            .filter(|doc| filter.matches_doc(*doc))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<T: Document> Collection<T> for MemoryCollection<T> {
    async fn insert(&self, doc: T) -> Result<T, StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        docs.insert(doc.id(), doc.clone());
        Ok(doc)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.values().find(|doc| filter.matches_doc(*doc)).cloned())
    }

    async fn find(&self, filter: &Filter, options: FindOptions) -> Result<Vec<T>, StoreError> {
        let mut matched = self.matching(filter)?;

        if options.sort_newest_first {
            matched.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }

        let page: Vec<T> = match options.limit {
            Some(limit) => matched.into_iter().skip(options.skip).take(limit).collect(),
            None => matched.into_iter().skip(options.skip).collect(),
        };
        Ok(page)
    }

    async fn count(&self, filter: &Filter) -> Result<usize, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.values().filter(|doc| filter.matches_doc(*doc)).count())
    }

    async fn update_one(
        &self,
        filter: &Filter,
        mutate: MutateOne<T>,
    ) -> Result<Option<T>, StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        let target = docs
            .values_mut()
            .find(|doc| filter.matches_doc(*doc));

        match target {
            Some(doc) => {
                mutate(doc);
                Ok(Some(doc.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_many(
        &self,
        filter: &Filter,
        mutate: MutateMany<T>,
    ) -> Result<usize, StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut touched = 0;
        for doc in docs.values_mut() {
            if filter.matches_doc(doc) {
                mutate(doc);
                touched += 1;
            }
        }
        Ok(touched)
    }
}
