//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer-token security scheme.
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{
    AckResponse, CategoryCountSchema, DocumentListResponse, DocumentSchema, ErrorCodeSchema,
    ErrorSchema, ProfileResponse, SupplyListResponse, SupplyRecordSchema, SupplyResponse,
    TokenResponse,
};
use crate::inbound::http::status::ServerStatus;
use crate::inbound::http::supplies::SupplyRequest;
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "bearer";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /api/v1/register or /api/v1/login."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Feed Forward backend API",
        description = "Donor accounts, donations, leaderboard, community wall and volunteer sign-ups."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::supplies::create_supply,
        crate::inbound::http::supplies::list_donations,
        crate::inbound::http::supplies::get_donation,
        crate::inbound::http::supplies::update_donation,
        crate::inbound::http::supplies::delete_donation,
        crate::inbound::http::supplies::get_donor,
        crate::inbound::http::categories::category_count,
        crate::inbound::http::feed::leaderboard,
        crate::inbound::http::feed::community_feed,
        crate::inbound::http::feed::publish_post,
        crate::inbound::http::entries::create_volunteer,
        crate::inbound::http::entries::list_volunteers,
        crate::inbound::http::entries::create_testimonial,
        crate::inbound::http::status::server_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SupplyRecordSchema,
        DocumentSchema,
        CategoryCountSchema,
        AckResponse,
        TokenResponse,
        SupplyListResponse,
        SupplyResponse,
        DocumentListResponse,
        ProfileResponse,
        RegisterRequest,
        LoginRequest,
        SupplyRequest,
        ServerStatus,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "donations", description = "Donation records and category statistics"),
        (name = "community", description = "Leaderboard and gratitude wall"),
        (name = "volunteers", description = "Volunteer sign-ups and testimonials"),
        (name = "health", description = "Status and health probes")
    )
)]
pub struct ApiDoc;
