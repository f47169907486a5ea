//! Liveness endpoint. Answers without touching storage.
use actix_web::{HttpResponse, get};
use serde::Serialize;

use crate::inbound::http::envelope;
use crate::inbound::http::schemas::PongEnvelopeSchema;

#[derive(Debug, Serialize)]
struct Pong {
    pong: &'static str,
}

/// Liveness probe. Always `200 {"pong":"pong"}`, independent of backend health.
#[utoipa::path(
    get,
    path = "/ping",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = PongEnvelopeSchema)
    )
)]
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    envelope::ok(Pong { pong: "pong" })
}
