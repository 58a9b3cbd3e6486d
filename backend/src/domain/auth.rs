//! Authentication primitives: credentials, registrations, password hashes and
//! bearer-token claims.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::user::{Email, EmailValidationError};

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email failed validation.
    #[error(transparent)]
    Email(#[from] EmailValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::Email(_) => "email",
            Self::EmptyPassword => "password",
        }
    }
}

fn checked_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.trim().is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` satisfies [`Email`] validation.
/// - `password` is non-blank but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use feedforward::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.org", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.org");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: checked_password(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            email: Email::new(email)?,
            password: checked_password(password)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Signed bearer token handed to clients after registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Claims carried by an access token.
///
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// Whether the claims have expired at `now` (Unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Errors returned when parsing a [`TokenTtl`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenTtlParseError {
    #[error("token lifetime must not be empty")]
    Empty,
    #[error("token lifetime `{0}` is not a number followed by s, m, h or d")]
    Malformed(String),
    #[error("token lifetime must be greater than zero")]
    Zero,
}

/// Lifetime of issued access tokens.
///
/// Parses `30s`, `15m`, `12h`, `7d` or a bare number of seconds.
///
/// # Examples
/// ```
/// use feedforward::domain::TokenTtl;
///
/// let ttl: TokenTtl = "12h".parse().unwrap();
/// assert_eq!(ttl.as_secs(), 43_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(Duration);

impl TokenTtl {
    /// Lifetime applied when none is configured.
    pub const DEFAULT: Self = Self(Duration::from_secs(7 * 24 * 60 * 60));

    /// Lifetime of `secs` seconds; zero is rejected.
    pub fn from_secs(secs: u64) -> Result<Self, TokenTtlParseError> {
        if secs == 0 {
            return Err(TokenTtlParseError::Zero);
        }
        Ok(Self(Duration::from_secs(secs)))
    }

    /// Lifetime in whole seconds.
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for TokenTtl {
    type Err = TokenTtlParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenTtlParseError::Empty);
        }
        let malformed = || TokenTtlParseError::Malformed(trimmed.to_owned());

        let (digits, multiplier) = match trimmed.char_indices().last() {
            Some((idx, 's')) => (&trimmed[..idx], 1),
            Some((idx, 'm')) => (&trimmed[..idx], 60),
            Some((idx, 'h')) => (&trimmed[..idx], 60 * 60),
            Some((idx, 'd')) => (&trimmed[..idx], 24 * 60 * 60),
            _ => (trimmed, 1),
        };
        let amount: u64 = digits.parse().map_err(|_| malformed())?;
        let secs = amount.checked_mul(multiplier).ok_or_else(malformed)?;
        Self::from_secs(secs)
    }
}
