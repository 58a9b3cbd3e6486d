//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error payload with `success: false`, a machine-readable code and a
/// human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "User already exists")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. `{"field": "id", "code": "invalid_id"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::SupplyRecord`].
///
/// Stored fields beyond those listed are returned unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::SupplyRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SupplyRecordSchema {
    #[schema(rename = "_id", example = "65a1f0c2b3d4e5f60718293a")]
    id: String,
    #[schema(example = "ada@example.org")]
    email: Option<String>,
    #[schema(example = "Rice")]
    title: String,
    #[schema(example = "Grains")]
    category: String,
    description: String,
    #[schema(example = 12)]
    quantity: f64,
}

/// Free-form stored document: declared fields plus any extra members.
#[derive(ToSchema)]
#[schema(as = crate::domain::Fields)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSchema {
    #[schema(rename = "_id", example = "65a1f0c2b3d4e5f60718293a")]
    id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::CategoryCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CategoryCount)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategoryCountSchema {
    #[schema(example = "Grains")]
    name: String,
    #[schema(example = 2)]
    value: u64,
}

/// `{"success": true, "message"?}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AckResponse {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Donation added Successfully")]
    message: Option<String>,
}

/// `{"success": true, "message", "token"}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TokenResponse {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Login successful")]
    message: String,
    /// HS256 bearer token carrying the donor email.
    token: String,
}

/// `{"success": true, "message", "data": [SupplyRecord]}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SupplyListResponse {
    success: bool,
    message: String,
    data: Vec<SupplyRecordSchema>,
}

/// `{"success": true, "message", "data": SupplyRecord}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SupplyResponse {
    success: bool,
    message: String,
    data: SupplyRecordSchema,
}

/// `{"success": true, "message"?, "data": [document]}` for profile-joined
/// feeds, donor profiles and free-form entry lists.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentListResponse {
    success: bool,
    message: Option<String>,
    data: Vec<DocumentSchema>,
}

/// `{"success": true, "message", "data": Profile}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileResponse {
    success: bool,
    #[schema(example = "Donor Information is retrieve Successfully")]
    message: String,
    data: DocumentSchema,
}
