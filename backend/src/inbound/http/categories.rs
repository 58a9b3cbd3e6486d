//! Category statistics.
//!
//! ```text
//! GET /api/v1/categoryCount -> [{"name":"Grains","value":2}, ...]
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ApiResult;
use crate::inbound::http::schemas::{CategoryCountSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Count donations per configured category.
///
/// Returns a bare array in category-list order; categories without
/// donations report `0`.
#[utoipa::path(
    get,
    path = "/api/v1/categoryCount",
    responses(
        (status = 200, description = "Donations per category", body = [CategoryCountSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "categoryCount",
    security([])
)]
#[get("/categoryCount")]
pub async fn category_count(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let counts = state.supplies.category_counts().await?;
    Ok(HttpResponse::Ok().json(counts))
}
