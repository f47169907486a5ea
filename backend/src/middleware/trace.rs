//! Request logging middleware.
//!
//! Every request gets a fresh [`RequestId`] that stays in task-local scope
//! while the handler runs, and a `request` span carrying the same id so every
//! log line of the request can be correlated. The middleware logs the request
//! on entry and the status on exit, and echoes the identifier in a `trace-id`
//! response header.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info, info_span};

use crate::domain::{Error as ApiError, RequestId};

/// Response header carrying the request identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Logging middleware attaching a request-scoped identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use search_admin::middleware::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::generate();
        info!(
            request_id = %request_id,
            method = %req.method(),
            url_path = req.path(),
            "New request"
        );
        let span = info_span!("request", request_id = %request_id);
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(RequestId::scope(request_id, respond(request_id, fut)).instrument(span))
    }
}

async fn respond<B, F>(request_id: RequestId, fut: F) -> Result<ServiceResponse<B>, Error>
where
    F: Future<Output = Result<ServiceResponse<B>, Error>>,
{
    let mut res = fut.await?;
    let error_message = res
        .response()
        .error()
        .and_then(|err| err.as_error::<ApiError>())
        .map_or("", ApiError::message);
    info!(
        request_id = %request_id,
        status_code = res.status().as_u16(),
        error_message,
        "Responding to request"
    );
    match HeaderValue::from_str(&request_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(%error, request_id = %request_id, "failed to encode request id header");
        }
    }
    Ok(res)
}
