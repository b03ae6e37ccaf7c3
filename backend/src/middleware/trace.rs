//! Request middleware that establishes the [`TraceId`] for each request.
//!
//! An identifier forwarded in the `trace-id` request header is reused when it
//! parses as a UUID. The handler runs inside a `request` span and the
//! identifier is echoed on the response.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap the whole `App` with it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use media_ranker::Trace;
///
/// let _app = App::new().wrap(Trace);
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
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService { inner: service }))
    }
}

#[doc(hidden)]
pub struct TraceService<S> {
    inner: S,
}

fn forwarded_trace_id(req: &ServiceRequest) -> TraceId {
    let forwarded = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    TraceId::adopt_or_generate(forwarded)
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = forwarded_trace_id(&req);
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = %req.path()
        );
        let handled = TraceId::scope(trace_id, self.inner.call(req)).instrument(span.clone());

        Box::pin(async move {
            let mut response = handled.await?;
            span.in_scope(|| debug!(status = response.status().as_u16(), "request finished"));
            let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) else {
                warn!(%trace_id, "trace identifier is not a valid header value");
                return Ok(response);
            };
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            Ok(response)
        })
    }
}
