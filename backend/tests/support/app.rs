//! Full-application helpers over in-memory storage.

use actix_web::App;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use feedforward::Trace;
use feedforward::domain::TRACE_ID_HEADER;
use feedforward::inbound::http::api_scope;
use feedforward::test_support::InMemoryBackend;
use serde_json::{Value, json};

/// Status, trace header and JSON body of one response.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Drive `request` through the `/api/v1` scope wired over `backend`.
///
/// Each call builds a fresh app; the repositories behind `backend` are
/// shared, so state carries over between calls.
pub async fn send(backend: &InMemoryBackend, request: TestRequest) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(backend.http_state())
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body_json(response).await;
    Reply {
        status,
        trace_id,
        body,
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Register `email` and return the issued token.
pub async fn register(backend: &InMemoryBackend, name: &str, email: &str) -> String {
    let reply = send(
        backend,
        TestRequest::post().uri("/api/v1/register").set_json(json!({
            "name": name,
            "email": email,
            "password": "correct horse",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["token"]
        .as_str()
        .expect("token in registration reply")
        .to_owned()
}

/// Create a donation owned by the holder of `token`.
pub async fn donate(
    backend: &InMemoryBackend,
    token: &str,
    title: &str,
    category: &str,
    quantity: u32,
) {
    let reply = send(
        backend,
        TestRequest::post()
            .uri("/api/v1/create-supply")
            .insert_header(bearer(token))
            .set_json(json!({
                "title": title,
                "category": category,
                "quantity": quantity,
            })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
}
