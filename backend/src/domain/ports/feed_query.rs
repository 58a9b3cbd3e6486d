//! Driving port for the profile-enriched listings.

use async_trait::async_trait;

use crate::domain::{EnrichedRecord, Error};

/// Domain use-case port for the leaderboard and the community feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Donations ranked by quantity (largest first), each merged with its
    /// donor profile.
    async fn leaderboard(&self) -> Result<Vec<EnrichedRecord>, Error>;

    /// Community posts newest first, each merged with its author profile.
    async fn community_feed(&self) -> Result<Vec<EnrichedRecord>, Error>;
}
