//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use serde_json::Value;

use crate::domain::IdFormat;
use crate::domain::ports::{MockFilterRepository, MockUserRepository};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::RequestValidator;
use crate::middleware::Trace;

/// State backed by mocks, shaped like the document-store deployment.
pub fn document_store_state(users: MockUserRepository, filters: MockFilterRepository) -> HttpState {
    HttpState::new(
        Arc::new(users),
        Some(Arc::new(filters)),
        RequestValidator::new(IdFormat::ObjectId),
    )
}

/// State backed by a mock, shaped like the key-value deployment.
pub fn key_value_state(users: MockUserRepository) -> HttpState {
    HttpState::new(Arc::new(users), None, RequestValidator::new(IdFormat::Counter))
}

/// Full route table over `state`, wrapped in the request logging middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}

/// Status and decoded envelope of a response.
pub async fn envelope(res: ServiceResponse) -> (u16, Value) {
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}
