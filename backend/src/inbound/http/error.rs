//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain and storage failures into enveloped JSON responses
//! with consistent status codes.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::ports::StorageError;
use crate::domain::{Error, ErrorCode};

use super::envelope::Envelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload";
pub(crate) const INTERNAL_MESSAGE: &str = "Internal server error";
pub(crate) const UNKNOWN_ROUTE_MESSAGE: &str = "Resource not found";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::failure(client_message(self)))
    }
}

/// Translate a storage failure for a resource into a domain error.
///
/// Malformed and unknown identifiers are indistinguishable to clients; both
/// answer with `not_found_message`. Backend detail is logged, never returned.
pub(crate) fn from_storage(err: StorageError, not_found_message: &'static str) -> Error {
    if err.is_missing_record() {
        return Error::not_found(not_found_message);
    }
    let error = Error::internal(err.to_string());
    error!(
        request_id = error.request_id().unwrap_or_default(),
        error = %err,
        "storage backend failed"
    );
    error
}

/// Error handler for `web::JsonConfig`: any decode failure is a bad request.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(INVALID_PAYLOAD_MESSAGE);
    warn!(
        request_id = error.request_id().unwrap_or_default(),
        error = %err,
        "request body could not be decoded"
    );
    error.into()
}

/// Default service answering routes that match nothing.
pub(crate) async fn unknown_route() -> ApiResult<HttpResponse> {
    Err(Error::not_found(UNKNOWN_ROUTE_MESSAGE))
}
