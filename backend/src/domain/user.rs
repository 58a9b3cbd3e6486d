//! Donor accounts and the public profile view used for merges.
//!
//! A [`User`] is keyed by its [`Email`]. Stored user documents may carry more
//! fields than the registration form collects; those survive in
//! [`User::extra`] and flow into the [`Profile`] so the leaderboard and
//! community feed show whatever the donor record holds.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::auth::PasswordHash;
use super::document::{Fields, ID_FIELD, null_as_default};

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain '@'")]
    MissingAtSign,
}

/// Donor email address, the join key between users and their records.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Contains an `@`.
///
/// Case is preserved; lookups compare addresses exactly.
///
/// # Examples
/// ```
/// use feedforward::domain::Email;
///
/// let email = Email::new("  ada@example.org ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.org");
/// assert!(Email::new("nobody").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailValidationError::MissingAtSign);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered donor as persisted by the credential store.
///
/// The password hash is stored under the `password` key to stay compatible
/// with existing user documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    email: Email,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "password")]
    password_hash: PasswordHash,
    #[serde(flatten)]
    extra: Fields,
}

impl User {
    /// Build a new user from validated parts.
    pub fn new(email: Email, name: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            email,
            name: name.into(),
            password_hash,
            extra: Fields::new(),
        }
    }

    /// Attach additional stored fields.
    pub fn with_extra(mut self, mut extra: Fields) -> Self {
        for key in ["email", "name", "password", ID_FIELD] {
            extra.remove(key);
        }
        self.extra = extra;
        self
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Stored fields beyond email, name and password.
    pub fn extra(&self) -> &Fields {
        &self.extra
    }

    /// Public view of this user with credentials removed.
    pub fn profile(&self) -> Profile {
        let mut fields = self.extra.clone();
        fields.remove(ID_FIELD);
        fields.insert("name".to_owned(), Value::String(self.name.clone()));
        fields.insert("email".to_owned(), Value::String(self.email.to_string()));
        Profile(fields)
    }
}

/// Public donor profile: every stored user field except the password hash
/// and the store identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Profile(Fields);

impl Profile {
    /// Email the profile was resolved for.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Profile fields, including `name` and `email`.
    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }
}
