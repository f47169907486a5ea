//! Error taxonomy shared by every storage port.
//!
//! Adapters classify their driver failures into these variants at the storage
//! boundary, so inbound adapters never see backend-specific error values.

/// Failures raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The identifier does not match the backend's id format.
    #[error("identifier {id:?} does not match the storage id format")]
    InvalidId { id: String },
    /// No record matches the identifier.
    #[error("no record with id {id}")]
    NotFound { id: String },
    /// Connectivity, serialization or any other driver failure.
    #[error("storage backend failed: {message}")]
    Backend { message: String },
}

impl StorageError {
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether the caller should treat the failure as "no such record".
    pub fn is_missing_record(&self) -> bool {
        matches!(self, Self::InvalidId { .. } | Self::NotFound { .. })
    }
}
