//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{Email, User};

use super::define_port_error;

define_port_error! {
    /// Failures reported by credential store adapters.
    pub enum UserPersistenceError {
        /// The `users` collection could not be reached.
        Connection { message: String } => "users store unreachable: {message}",
        /// A lookup or insert was rejected by the store.
        Query { message: String } => "users store operation failed: {message}",
        /// The email is already registered.
        Duplicate { email: String } => "user {email} already exists",
    }
}

/// Port for reading and registering donor accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user whose email is in `emails`, in no particular order.
    ///
    /// Emails without a matching user are silently absent from the result,
    /// as are stored users that cannot be read.
    async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a new user, failing with [`UserPersistenceError::Duplicate`]
    /// when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;
}
