//! Uniform JSON envelope wrapping every response body.
//!
//! ```text
//! {"success": true, "errorMessage": "", "data": {...}}
//! {"success": false, "errorMessage": "No user with such id", "data": null}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// Response body shared by success and failure responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub error_message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error_message: String::new(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Failed envelope with `data: null`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            data: None,
        }
    }
}

fn respond<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::success(data))
}

/// `200 OK` with `data` in the envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::OK, data)
}

/// `201 Created` with `data` in the envelope.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::CREATED, data)
}

/// `200 OK` with `data: null`.
pub fn empty() -> HttpResponse {
    respond(StatusCode::OK, ())
}
