//! Bearer-token authentication for protected handlers.
//!
//! Handlers that mutate data take an [`AuthenticatedDonor`] argument. The
//! extractor reads `Authorization: Bearer <token>`, verifies it through the
//! [`TokenIssuer`](crate::domain::ports::TokenIssuer) held in [`HttpState`]
//! and yields the donor email carried by the token. Public listings simply
//! omit the argument.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::ports::TokenError;
use crate::domain::{Email, Error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Email of the donor whose bearer token accompanied the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedDonor(Email);

impl AuthenticatedDonor {
    /// Email carried by the verified token.
    pub fn email(&self) -> &Email {
        &self.0
    }

    pub fn into_email(self) -> Email {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Authorization token is required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Authorization header is not valid text"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedDonor, Error> {
    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        error!("HTTP state missing while authenticating request");
        Error::internal("HTTP state is not configured")
    })?;
    let token = bearer_token(req)?;
    let claims = state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        match err {
            TokenError::Expired => Error::unauthorized("Access token has expired"),
            TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                Error::unauthorized("Access token is invalid")
            }
        }
    })?;
    let email = Email::new(&claims.email)
        .map_err(|_| Error::unauthorized("Access token does not name a donor"))?;
    Ok(AuthenticatedDonor(email))
}

impl FromRequest for AuthenticatedDonor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
