//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{RecordId, User, UserDraft};

use super::StorageError;

/// Storage capability for user accounts.
///
/// Dropping a returned future abandons the backend call; adapters rely on
/// their drivers for best-effort cancellation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with the assigned identifier.
    async fn create(&self, draft: UserDraft) -> Result<User, StorageError>;

    /// Return every stored user; an empty store yields an empty vector.
    async fn list(&self) -> Result<Vec<User>, StorageError>;

    /// Fetch one user by identifier.
    async fn get(&self, id: &RecordId) -> Result<User, StorageError>;

    /// Replace the mutable fields of the user matching `user.id`.
    ///
    /// Callers merge the identifier from the resource path into `user`
    /// before calling.
    async fn update(&self, user: &User) -> Result<(), StorageError>;

    /// Remove exactly one user matching `id`.
    async fn delete(&self, id: &RecordId) -> Result<(), StorageError>;
}
