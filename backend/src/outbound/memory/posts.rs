use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post};

use super::{IdSequence, POISONED};

/// `posts` collection held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    ids: IdSequence,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let post = post.into_record(self.ids.next_id());
        self.posts
            .lock()
            .map_err(|_| PostRepositoryError::query(POISONED))?
            .push(post.clone());
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = self
            .posts
            .lock()
            .map_err(|_| PostRepositoryError::query(POISONED))?;
        Ok(posts.clone())
    }
}
