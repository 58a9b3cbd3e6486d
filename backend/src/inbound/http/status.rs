//! Root status endpoint.

use actix_web::{HttpResponse, get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) const RUNNING_MESSAGE: &str = "Server is running smoothly";

/// `{"message": "Server is running smoothly", "timestamp": "<RFC 3339>"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerStatus {
    #[schema(value_type = String, example = "Server is running smoothly")]
    message: &'static str,
    #[schema(value_type = String, example = "2026-01-15T12:00:00Z")]
    timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Server status", body = ServerStatus))
)]
#[get("/")]
pub async fn server_status() -> HttpResponse {
    HttpResponse::Ok().json(ServerStatus {
        message: RUNNING_MESSAGE,
        timestamp: Utc::now(),
    })
}
