//! Leaderboard and community "gratitude wall".
//!
//! ```text
//! GET  /api/v1/leaderboard
//! GET  /api/v1/community
//! POST /api/v1/community   (bearer)
//! ```
//!
//! Both listings merge each record with its donor's profile; see
//! [`crate::domain::enrichment`].

use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;

use crate::domain::{ApiResult, NewPost};
use crate::inbound::http::auth::AuthenticatedDonor;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    AckResponse, DocumentListResponse, DocumentSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::object_body;

pub(crate) const LEADERBOARD_MESSAGE: &str = "Donations are retrieve Successfully";

/// Donations ranked by quantity, each merged with its donor profile.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    responses(
        (status = 200, description = "Ranked donations", body = DocumentListResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["community"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/leaderboard")]
pub async fn leaderboard(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let ranked = state.feed.leaderboard().await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(LEADERBOARD_MESSAGE, ranked)))
}

/// Community posts, newest first, each merged with its author's profile.
#[utoipa::path(
    get,
    path = "/api/v1/community",
    responses(
        (status = 200, description = "Community feed", body = DocumentListResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["community"],
    operation_id = "communityFeed",
    security([])
)]
#[get("/community")]
pub async fn community_feed(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let posts = state.feed.community_feed().await?;
    Ok(HttpResponse::Ok().json(Envelope::data(posts)))
}

/// Publish a free-form post authored by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/community",
    request_body(
        content = DocumentSchema,
        description = "Free-form post; `email` is set from the token"
    ),
    responses(
        (status = 200, description = "Post stored", body = AckResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["community"],
    operation_id = "publishPost",
    security(("bearer" = []))
)]
#[post("/community")]
pub async fn publish_post(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let fields = object_body(payload.into_inner())?;
    state
        .community
        .publish(NewPost::new(donor.into_email(), fields))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::ack()))
}
