//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::TokenClaims;
use crate::domain::ports::{
    MockAccountCommand, MockCommunityCommand, MockEntryLog, MockFeedQuery, MockProfileQuery,
    MockSupplyCommand, MockSupplyQuery, MockTokenIssuer, TokenError,
};

use super::state::HttpState;

pub const DONOR_EMAIL: &str = "ada@example.org";
pub const DONOR_TOKEN: &str = "donor-token";

/// Mocked ports for a handler test.
///
/// Ports left untouched have no expectations, so any call to them fails the
/// test.
#[derive(Default)]
pub struct StateBuilder {
    pub accounts: MockAccountCommand,
    pub profiles: MockProfileQuery,
    pub supply_commands: MockSupplyCommand,
    pub supplies: MockSupplyQuery,
    pub feed: MockFeedQuery,
    pub community: MockCommunityCommand,
    pub entries: MockEntryLog,
    pub tokens: MockTokenIssuer,
}

impl StateBuilder {
    /// Accept [`DONOR_TOKEN`] as a token for [`DONOR_EMAIL`]; reject others.
    pub fn accept_donor_token(&mut self) -> &mut Self {
        self.tokens.expect_verify().returning(|token| {
            if token == DONOR_TOKEN {
                Ok(TokenClaims {
                    email: DONOR_EMAIL.to_owned(),
                    iat: 0,
                    exp: i64::MAX,
                })
            } else {
                Err(TokenError::invalid("signature mismatch"))
            }
        });
        self
    }

    pub fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(self.accounts),
            profiles: Arc::new(self.profiles),
            supply_commands: Arc::new(self.supply_commands),
            supplies: Arc::new(self.supplies),
            feed: Arc::new(self.feed),
            community: Arc::new(self.community),
            entries: Arc::new(self.entries),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// `Authorization` header value for the accepted donor token.
pub fn donor_bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {DONOR_TOKEN}"))
}
