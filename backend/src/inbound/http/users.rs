//! User API handlers.
//!
//! ```text
//! POST /user {"login":"mary","password":"12345","index_limit":5}
//! GET /users
//! GET /user/{id}
//! PUT /user/{id}
//! DELETE /user/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{RecordId, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::error::from_storage;
use crate::inbound::http::payloads::UserPayload;
use crate::inbound::http::schemas::{
    EmptyEnvelopeSchema, FailureEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

pub(crate) const USER_NOT_FOUND: &str = "No user with such id";

/// Create a user; storage assigns the id.
#[utoipa::path(
    post,
    path = "/user",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserEnvelopeSchema),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = state.validator.user_draft(payload.into_inner())?;
    let user = state
        .users
        .create(draft)
        .await
        .map_err(|err| from_storage(err, USER_NOT_FOUND))?;
    info!(user_id = %user.id, "user created");
    Ok(envelope::created(user))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UserListEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users: Vec<User> = state
        .users
        .list()
        .await
        .map_err(|err| from_storage(err, USER_NOT_FOUND))?;
    Ok(envelope::ok(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserEnvelopeSchema),
        (status = 404, description = "No user with such id", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id:[0-9a-z]+}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    let user = state
        .users
        .get(&id)
        .await
        .map_err(|err| from_storage(err, USER_NOT_FOUND))?;
    Ok(envelope::ok(user))
}

/// Replace the mutable fields of a user. The path id wins over any body id.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserEnvelopeSchema),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 404, description = "No user with such id", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id:[0-9a-z]+}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = state.validator.user_draft(payload.into_inner())?;
    let user = draft.with_id(RecordId::new(path.into_inner()));
    state
        .users
        .update(&user)
        .await
        .map_err(|err| from_storage(err, USER_NOT_FOUND))?;
    info!(user_id = %user.id, "user updated");
    Ok(envelope::ok(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = EmptyEnvelopeSchema),
        (status = 404, description = "No user with such id", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id:[0-9a-z]+}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    state
        .users
        .delete(&id)
        .await
        .map_err(|err| from_storage(err, USER_NOT_FOUND))?;
    info!(user_id = %id, "user deleted");
    Ok(envelope::empty())
}
