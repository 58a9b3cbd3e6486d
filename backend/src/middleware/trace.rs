//! Per-request correlation ids.
//!
//! A client or proxy may send its own `trace-id` header; when it parses as a
//! UUID it is reused so one id can follow a request across services.
//! Otherwise a fresh id is generated. Either way the handler runs inside
//! [`TraceId::scope`] and the response echoes the id in `trace-id`.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware that scopes each request to a [`TraceId`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use feedforward::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Default)]
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
        ready(Ok(TraceMiddleware { inner: service }))
    }
}

pub struct TraceMiddleware<S> {
    inner: S,
}

/// Reuse a well-formed inbound id, otherwise mint one.
fn trace_id_for(req: &ServiceRequest) -> TraceId {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or_else(TraceId::generate)
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
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = trace_id_for(&req);
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let pending = self.inner.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let mut response = pending.await?;
            debug!(
                trace_id = %trace_id,
                %method,
                path,
                status = response.status().as_u16(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(err) => warn!(error = %err, trace_id = %trace_id, "trace id is not a valid header"),
            }
            Ok(response)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiResult;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn echo_current_id() -> HttpResponse {
        match TraceId::current() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn missing_donation() -> ApiResult<HttpResponse> {
        Err(crate::domain::Error::not_found("Donation not found"))
    }

    fn header_of(response: &ServiceResponse) -> String {
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("trace-id header")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn handlers_see_the_id_sent_back_in_the_header() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_current_id)),
        )
        .await;

        let response = actix_test::call_service(&app, actix_test::TestRequest::get().to_request()).await;
        let header = header_of(&response);
        let body = actix_test::read_body(response).await;

        assert_eq!(body, header.as_bytes());
    }

    #[rstest]
    #[case("0b5d3a4e-8a8f-4c43-9c55-6f1c2d9e7a10", true)]
    #[case("not-a-uuid", false)]
    #[actix_web::test]
    async fn well_formed_inbound_ids_are_reused(#[case] inbound: &str, #[case] reused: bool) {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_current_id)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .insert_header((TRACE_ID_HEADER, inbound))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(header_of(&response) == inbound, reused);
    }

    #[rstest]
    #[actix_web::test]
    async fn error_bodies_carry_the_same_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(missing_donation)),
        )
        .await;

        let response = actix_test::call_service(&app, actix_test::TestRequest::get().to_request()).await;
        let header = header_of(&response);
        let body: Value = actix_test::read_body_json(response).await;

        assert_eq!(body["traceId"], json!(header));
        assert_eq!(body["success"], json!(false));
    }
}
