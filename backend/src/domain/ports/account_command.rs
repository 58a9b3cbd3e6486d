//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and exchange
//! credentials for bearer tokens without importing hashing, signing or
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration};

/// Domain use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a donor and return a token for the new account.
    ///
    /// Fails with a conflict when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<AccessToken, Error>;

    /// Validate credentials and return a fresh token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error>;
}
