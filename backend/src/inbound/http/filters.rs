//! Filter API handlers.
//!
//! ```text
//! POST /filter {"regex":"^foo.*bar$"}
//! GET /filters
//! GET /filter/{id}
//! DELETE /filter/{id}
//! ```
//!
//! Every route answers `501` when the configured backend has no filter
//! capability. The capability check runs before the body is validated.

use actix_web::{HttpResponse, delete, get, post, web};
use tracing::info;

use crate::domain::{Filter, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::error::from_storage;
use crate::inbound::http::payloads::FilterPayload;
use crate::inbound::http::schemas::{
    EmptyEnvelopeSchema, FailureEnvelopeSchema, FilterEnvelopeSchema, FilterListEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

pub(crate) const FILTER_NOT_FOUND: &str = "No filter with such id";

/// Create a filter from an RE2-compatible pattern.
#[utoipa::path(
    post,
    path = "/filter",
    request_body = FilterPayload,
    responses(
        (status = 201, description = "Filter created", body = FilterEnvelopeSchema),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 501, description = "Backend has no filter support", body = FailureEnvelopeSchema)
    ),
    tags = ["filters"],
    operation_id = "createFilter"
)]
#[post("/filter")]
pub async fn create_filter(
    state: web::Data<HttpState>,
    payload: web::Json<FilterPayload>,
) -> ApiResult<HttpResponse> {
    let filters = state.filters()?;
    let draft = state.validator.filter_draft(payload.into_inner())?;
    let filter = filters
        .create(draft)
        .await
        .map_err(|err| from_storage(err, FILTER_NOT_FOUND))?;
    info!(filter_id = %filter.id, "filter created");
    Ok(envelope::created(filter))
}

/// List every filter.
#[utoipa::path(
    get,
    path = "/filters",
    responses(
        (status = 200, description = "Filters", body = FilterListEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 501, description = "Backend has no filter support", body = FailureEnvelopeSchema)
    ),
    tags = ["filters"],
    operation_id = "listFilters"
)]
#[get("/filters")]
pub async fn list_filters(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let filters: Vec<Filter> = state
        .filters()?
        .list()
        .await
        .map_err(|err| from_storage(err, FILTER_NOT_FOUND))?;
    Ok(envelope::ok(filters))
}

/// Fetch one filter.
#[utoipa::path(
    get,
    path = "/filter/{id}",
    params(("id" = String, Path, description = "Filter identifier")),
    responses(
        (status = 200, description = "Filter", body = FilterEnvelopeSchema),
        (status = 404, description = "No filter with such id", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 501, description = "Backend has no filter support", body = FailureEnvelopeSchema)
    ),
    tags = ["filters"],
    operation_id = "getFilter"
)]
#[get("/filter/{id:[0-9a-z]+}")]
pub async fn get_filter(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    let filter = state
        .filters()?
        .get(&id)
        .await
        .map_err(|err| from_storage(err, FILTER_NOT_FOUND))?;
    Ok(envelope::ok(filter))
}

/// Delete a filter.
#[utoipa::path(
    delete,
    path = "/filter/{id}",
    params(("id" = String, Path, description = "Filter identifier")),
    responses(
        (status = 200, description = "Filter deleted", body = EmptyEnvelopeSchema),
        (status = 404, description = "No filter with such id", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 501, description = "Backend has no filter support", body = FailureEnvelopeSchema)
    ),
    tags = ["filters"],
    operation_id = "deleteFilter"
)]
#[delete("/filter/{id:[0-9a-z]+}")]
pub async fn delete_filter(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    state
        .filters()?
        .delete(&id)
        .await
        .map_err(|err| from_storage(err, FILTER_NOT_FOUND))?;
    info!(filter_id = %id, "filter deleted");
    Ok(envelope::empty())
}
