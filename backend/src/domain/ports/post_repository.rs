//! Port for gratitude-wall post persistence.

use async_trait::async_trait;

use crate::domain::{NewPost, Post};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Port for the append-only `posts` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Append a post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError>;

    /// Every post in insertion order, oldest first.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;
}
