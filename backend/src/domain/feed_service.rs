//! Leaderboard and community feed service.
//!
//! Both listings load their primary records, resolve donor profiles with one
//! batch lookup, and merge them with [`enrich`]. A failed profile lookup is
//! logged and degrades every record to "no profile"; it never fails the
//! listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::enrichment::{PrimaryRecord, distinct_emails, enrich, rank_by_quantity};
use crate::domain::ports::{
    CommunityCommand, FeedQuery, PostRepository, PostRepositoryError, SupplyRepository,
    UserRepository,
};
use crate::domain::supply_service::map_supply_error;
use crate::domain::{EnrichedRecord, Error, NewPost, Post, ProfileIndex, User};

fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

/// Profile-enriched listings and community publishing.
#[derive(Clone)]
pub struct FeedService<S, P, U> {
    supplies: Arc<S>,
    posts: Arc<P>,
    users: Arc<U>,
}

impl<S, P, U> FeedService<S, P, U> {
    pub fn new(supplies: Arc<S>, posts: Arc<P>, users: Arc<U>) -> Self {
        Self {
            supplies,
            posts,
            users,
        }
    }
}

impl<S, P, U: UserRepository> FeedService<S, P, U> {
    async fn resolve_profiles<R>(&self, records: &[R]) -> ProfileIndex
    where
        R: PrimaryRecord + Sync,
    {
        let emails = distinct_emails(records);
        if emails.is_empty() {
            return ProfileIndex::empty();
        }
        match self.users.find_by_emails(&emails).await {
            Ok(users) => ProfileIndex::from_profiles(users.iter().map(User::profile)),
            Err(err) => {
                warn!(
                    error = %err,
                    emails = emails.len(),
                    "profile lookup failed; serving records without profiles"
                );
                ProfileIndex::empty()
            }
        }
    }
}

#[async_trait]
impl<S, P, U> FeedQuery for FeedService<S, P, U>
where
    S: SupplyRepository,
    P: PostRepository,
    U: UserRepository,
{
    async fn leaderboard(&self) -> Result<Vec<EnrichedRecord>, Error> {
        let mut records = self.supplies.list().await.map_err(map_supply_error)?;
        rank_by_quantity(&mut records);
        let profiles = self.resolve_profiles(&records).await;
        Ok(enrich(records, &profiles))
    }

    async fn community_feed(&self) -> Result<Vec<EnrichedRecord>, Error> {
        let posts = self.posts.list().await.map_err(map_post_error)?;
        let profiles = self.resolve_profiles(&posts).await;
        let mut feed = enrich(posts, &profiles);
        feed.reverse();
        Ok(feed)
    }
}

#[async_trait]
impl<S, P, U> CommunityCommand for FeedService<S, P, U>
where
    S: Send + Sync,
    P: PostRepository,
    U: Send + Sync,
{
    async fn publish(&self, post: NewPost) -> Result<Post, Error> {
        let post = self.posts.insert(post).await.map_err(map_post_error)?;
        info!(id = %post.id, "community post published");
        Ok(post)
    }
}

#[cfg(test)]
#[path = "feed_service_tests.rs"]
mod tests;
