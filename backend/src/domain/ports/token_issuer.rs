//! Port for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, Email, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token is malformed or its signature does not verify.
        Invalid { message: String } => "access token is invalid: {message}",
        /// The token verified but its lifetime has elapsed.
        Expired => "access token has expired",
        /// Signing a new token failed.
        Signing { message: String } => "access token could not be signed: {message}",
    }
}

/// Issues tokens carrying an `email` claim and verifies presented tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `email` valid from now for the configured lifetime.
    fn issue(&self, email: &Email) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry of `token` and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
