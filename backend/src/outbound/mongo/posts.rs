//! Document-store `PostRepository` over the `posts` collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post};

use super::codec::{decode_each, encode, new_record_id};
use super::error_mapping::map_mongo_error;
use super::{DocumentStore, POSTS};

fn map_error(err: mongodb::error::Error) -> PostRepositoryError {
    map_mongo_error(
        POSTS,
        err,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

/// MongoDB-backed gratitude wall.
#[derive(Clone)]
pub struct MongoPostRepository {
    posts: Collection<Document>,
}

impl MongoPostRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            posts: store.collection(POSTS),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let post = post.into_record(new_record_id().map_err(PostRepositoryError::query)?);
        let document = encode(&post).map_err(PostRepositoryError::query)?;
        self.posts.insert_one(document).await.map_err(map_error)?;
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let documents: Vec<Document> = self
            .posts
            .find(doc! {})
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(decode_each(POSTS, documents))
    }
}
