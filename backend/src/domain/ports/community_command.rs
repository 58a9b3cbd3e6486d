//! Driving port for publishing gratitude-wall posts.

use async_trait::async_trait;

use crate::domain::{Error, NewPost, Post};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityCommand: Send + Sync {
    /// Append a post authored by `post.author()`.
    async fn publish(&self, post: NewPost) -> Result<Post, Error>;
}
