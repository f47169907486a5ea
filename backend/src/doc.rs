//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer together
//! with the schema wrappers in [`crate::inbound::http::schemas`], so domain
//! types stay free of utoipa derives.
//!
//! The generated document is served by Swagger UI in debug builds and printed
//! by `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::payloads::{FilterPayload, IndexPayload, UserPayload};
use crate::inbound::http::schemas::{
    EmptyEnvelopeSchema, FailureEnvelopeSchema, FilterEnvelopeSchema, FilterListEnvelopeSchema,
    FilterSchema, IndexSchema, PongEnvelopeSchema, PongSchema, UserEnvelopeSchema,
    UserListEnvelopeSchema, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Search admin API",
        description = "Administration of search users and regex filters. Every response is \
                       wrapped in a {success, errorMessage, data} envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::ping::ping,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::filters::create_filter,
        crate::inbound::http::filters::list_filters,
        crate::inbound::http::filters::get_filter,
        crate::inbound::http::filters::delete_filter,
    ),
    components(schemas(
        UserPayload,
        IndexPayload,
        FilterPayload,
        UserSchema,
        IndexSchema,
        FilterSchema,
        PongSchema,
        UserEnvelopeSchema,
        UserListEnvelopeSchema,
        FilterEnvelopeSchema,
        FilterListEnvelopeSchema,
        PongEnvelopeSchema,
        EmptyEnvelopeSchema,
        FailureEnvelopeSchema,
    )),
    tags(
        (name = "users", description = "User accounts and their search indexes"),
        (name = "filters", description = "RE2-compatible regex filters"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
