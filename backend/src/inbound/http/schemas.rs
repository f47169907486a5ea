//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and exist only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Index`].
#[derive(ToSchema)]
#[schema(as = Index)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IndexSchema {
    #[schema(example = "aaa")]
    id: String,
    #[schema(example = "products")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Storage-assigned identifier.
    #[schema(example = "66d8420df6e5311a791e0a08")]
    id: String,
    #[schema(example = "mary")]
    login: String,
    /// Stored and returned in plaintext.
    #[schema(example = "12345")]
    password: String,
    #[schema(example = 5, minimum = 1)]
    index_limit: u32,
    indexes: Vec<IndexSchema>,
}

/// OpenAPI schema for [`crate::domain::Filter`].
#[derive(ToSchema)]
#[schema(as = Filter)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FilterSchema {
    #[schema(example = "66d8420df6e5311a791e0a08")]
    id: String,
    /// RE2-compatible pattern.
    #[schema(example = "^foo.*bar$")]
    regex: String,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PongSchema {
    #[schema(example = "pong")]
    pong: String,
}

macro_rules! envelope_schema {
    ($(#[$meta:meta])* $name:ident, $data:ty) => {
        $(#[$meta])*
        #[derive(ToSchema)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            success: bool,
            #[schema(rename = "errorMessage", example = "")]
            error_message: String,
            data: $data,
        }
    };
}

envelope_schema!(
    /// Envelope carrying one user.
    UserEnvelopeSchema,
    UserSchema
);
envelope_schema!(
    /// Envelope carrying every user.
    UserListEnvelopeSchema,
    Vec<UserSchema>
);
envelope_schema!(
    /// Envelope carrying one filter.
    FilterEnvelopeSchema,
    FilterSchema
);
envelope_schema!(
    /// Envelope carrying every filter.
    FilterListEnvelopeSchema,
    Vec<FilterSchema>
);
envelope_schema!(
    /// Envelope of the liveness probe.
    PongEnvelopeSchema,
    PongSchema
);
envelope_schema!(
    /// Successful envelope without data (`data: null`).
    EmptyEnvelopeSchema,
    Option<String>
);
envelope_schema!(
    /// Failed request; `errorMessage` explains why and `data` is null.
    FailureEnvelopeSchema,
    Option<String>
);
