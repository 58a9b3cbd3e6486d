//! Driving port for donor profile lookups.

use async_trait::async_trait;

use crate::domain::{Email, Error, Profile};

/// Domain use-case port for reading a donor's public profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Return the profile registered under `email`, or a not-found error.
    async fn donor_profile(&self, email: &Email) -> Result<Profile, Error>;
}
