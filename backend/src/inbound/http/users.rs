//! Registration and login handlers.
//!
//! ```text
//! POST /api/v1/register {"name":"Ada","email":"ada@example.org","password":"secret"}
//! POST /api/v1/login {"email":"ada@example.org","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, LoginCredentials, Registration};
use crate::inbound::http::envelope::TokenEnvelope;
use crate::inbound::http::schemas::{ErrorSchema, TokenResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

pub(crate) const REGISTERED_MESSAGE: &str = "User registered successfully";
pub(crate) const LOGGED_IN_MESSAGE: &str = "Login successful";

/// Registration request body for `POST /api/v1/register`.
///
/// Missing members deserialise as empty strings and are rejected by
/// validation with a field-specific error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register a donor and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&name, &email, &password).map_err(credentials_error)?;
    let token = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(TokenEnvelope::new(REGISTERED_MESSAGE, token.into_inner())))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(credentials_error)?;
    let token = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok().json(TokenEnvelope::new(LOGGED_IN_MESSAGE, token.into_inner())))
}
