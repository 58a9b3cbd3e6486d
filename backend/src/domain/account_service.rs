//! Account domain service.
//!
//! Implements registration, login and donor profile lookup on top of the
//! credential store, the password hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountCommand, PasswordHashError, PasswordHasher, ProfileQuery, TokenError, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, Email, Error, LoginCredentials, PasswordHash, Profile, Registration, TraceId,
    User,
};

pub(crate) const USER_EXISTS_MESSAGE: &str = "User already exists";
pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict(USER_EXISTS_MESSAGE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

/// Registration, login and profile lookups.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        TraceId::in_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        TraceId::in_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hash_error)
    }

    fn issue_token(&self, email: &Email) -> Result<AccessToken, Error> {
        self.tokens.issue(email).map_err(map_token_error)
    }
}

#[async_trait]
impl<U, H, T> AccountCommand for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    async fn register(&self, registration: Registration) -> Result<AccessToken, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(USER_EXISTS_MESSAGE));
        }

        let hash = self.hash_password(registration.password()).await?;
        let user = User::new(registration.email().clone(), registration.name(), hash);
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(email = %user.email(), "registered donor");

        self.issue_token(user.email())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!(email = %credentials.email(), "login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .verify_password(credentials.password(), user.password_hash().clone())
            .await?;
        if !matches {
            debug!(email = %credentials.email(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        self.issue_token(user.email())
    }
}

#[async_trait]
impl<U, H, T> ProfileQuery for AccountService<U, H, T>
where
    U: UserRepository,
    H: Send + Sync,
    T: Send + Sync,
{
    async fn donor_profile(&self, email: &Email) -> Result<Profile, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .map(|user| user.profile())
            .ok_or_else(|| Error::not_found(format!("no donor registered as {email}")))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
