//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses carrying the uniform JSON envelope.

use std::fmt;

use crate::domain::RequestId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The configured storage backend lacks the requested capability.
    NotImplemented,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Domain error carrying a client-facing message.
///
/// Captures the request-scoped [`RequestId`] when one is in scope so adapters
/// can correlate the error with request logs.
///
/// # Examples
/// ```
/// use search_admin::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("No user with such id");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "No user with such id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    request_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the current request identifier.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: RequestId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::NotImplemented`].
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotImplemented, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::not_implemented("absent"), ErrorCode::NotImplemented)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn new_has_no_request_id_out_of_scope() {
        assert!(Error::internal("boom").request_id().is_none());
    }

    #[tokio::test]
    async fn new_captures_scoped_request_id() {
        let request_id: RequestId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let error = RequestId::scope(request_id, async { Error::not_found("missing") }).await;
        assert_eq!(error.request_id(), Some(request_id.to_string().as_str()));
    }

    #[rstest]
    fn display_renders_message() {
        assert_eq!(Error::invalid_request("bad").to_string(), "bad");
    }
}
