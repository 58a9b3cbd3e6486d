//! Document-store `UserRepository` over the `users` collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, ID_FIELD, User};

use super::codec::{decode, encode};
use super::error_mapping::{is_duplicate_key, map_mongo_error};
use super::{DocumentStore, USERS};

fn map_error(err: mongodb::error::Error) -> UserPersistenceError {
    map_mongo_error(
        USERS,
        err,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

// The store id is not part of the user model.
fn decode_user(mut document: Document) -> Result<User, UserPersistenceError> {
    document.remove(ID_FIELD);
    decode(document).map_err(UserPersistenceError::query)
}

// One malformed user only costs that donor their profile merge.
fn decode_users(documents: Vec<Document>) -> Vec<User> {
    documents
        .into_iter()
        .filter_map(|document| {
            let email = document.get_str("email").ok().map(str::to_owned);
            decode_user(document)
                .map_err(|error| warn!(collection = USERS, email = email.as_deref(), %error, "skipping undecodable user"))
                .ok()
        })
        .collect()
}

/// MongoDB-backed credential store.
#[derive(Clone)]
pub struct MongoUserRepository {
    users: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            users: store.collection(USERS),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        self.users
            .find_one(doc! { "email": email.as_ref() })
            .await
            .map_err(map_error)?
            .map(decode_user)
            .transpose()
    }

    async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<Document> = self
            .users
            .find(doc! { "email": { "$in": emails.to_vec() } })
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(decode_users(documents))
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let document = encode(user).map_err(UserPersistenceError::query)?;
        match self.users.insert_one(document).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => {
                Err(UserPersistenceError::duplicate(user.email().as_ref()))
            }
            Err(err) => Err(map_error(err)),
        }
    }
}
