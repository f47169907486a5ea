//! Domain primitives and ports.
//!
//! Purpose: define the user and filter records managed by the service, the
//! transport-agnostic error type and the storage ports adapters implement.
//!
//! Public surface:
//! - Error / ErrorCode: failure reported to inbound adapters.
//! - User / UserDraft / Index: user accounts and their search indexes.
//! - Filter / FilterDraft / FilterPattern: RE2-compatible filters.
//! - RecordId / IdFormat: storage-assigned identifiers.
//! - RequestId: task-local request correlation identifier.

pub mod error;
pub mod filter;
pub mod ports;
pub mod record_id;
pub mod request_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::filter::{Filter, FilterDraft, FilterPattern, FilterPatternError};
pub use self::record_id::{IdFormat, RecordId};
pub use self::request_id::RequestId;
pub use self::user::{Index, User, UserDraft};
