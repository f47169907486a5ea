//! Port abstraction for filter persistence adapters.
//!
//! Not every backend provides this capability; servers hold it as an
//! `Option` and report its absence explicitly.
use async_trait::async_trait;

use crate::domain::{Filter, FilterDraft, RecordId};

use super::StorageError;

/// Storage capability for regular-expression filters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterRepository: Send + Sync {
    /// Persist a new filter and return it with the assigned identifier.
    async fn create(&self, draft: FilterDraft) -> Result<Filter, StorageError>;

    /// Return every stored filter; an empty store yields an empty vector.
    async fn list(&self) -> Result<Vec<Filter>, StorageError>;

    /// Fetch one filter by identifier.
    async fn get(&self, id: &RecordId) -> Result<Filter, StorageError>;

    /// Remove exactly one filter matching `id`.
    async fn delete(&self, id: &RecordId) -> Result<(), StorageError>;
}
