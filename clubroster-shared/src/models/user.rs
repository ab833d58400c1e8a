/// User model and store operations
///
/// This module provides the User document and its CRUD operations. A user
/// optionally points at the club it currently belongs to; the club keeps
/// the mirror reference in its member list (see [`crate::models::club`]).
///
/// # Document shape
///
/// ```text
/// {
///     _id: ObjectId,
///     name: string,
///     email: string,
///     age: int32,
///     position: string,
///     club: ObjectId?   // absent when the user belongs to no club
/// }
/// ```
///
/// # Example
///
/// ```no_run
/// use clubroster_shared::models::user::{CreateUser, User};
/// use clubroster_shared::db::store::{Store, StoreConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::connect(StoreConfig::default()).await?;
///
/// let user = User::create(&store, CreateUser {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     age: 36,
///     position: "midfield".to_string(),
///     club: None,
/// }).await?;
///
/// let found = User::find_by_id(&store, user.id).await?;
/// # Ok(())
/// # }
/// ```
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use crate::db::store::{Store, StoreError};

/// User document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id, generated at insert
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Display name
    pub name: String,

    /// Email address (not validated, not unique; the source system never
    /// constrained it)
    pub email: String,

    /// Age in years
    pub age: i32,

    /// Position within the club (free-form string)
    pub position: String,

    /// The club this user currently belongs to, if any
    ///
    /// The club document holds the mirror reference in its `users` array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ObjectId>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub position: String,

    /// Initial club reference; the caller is responsible for inserting the
    /// user into the club's member set as well
    pub club: Option<ObjectId>,
}

/// Input for updating a user's scalar fields
///
/// Club reassignment is a separate operation ([`User::set_club`]) because
/// it also touches the club document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub position: String,
}

impl User {
    /// Creates a new user in the store
    ///
    /// The id is generated client-side so the returned value is the full
    /// document as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the write
    pub async fn create(store: &Store, data: CreateUser) -> Result<Self, StoreError> {
        let user = User {
            id: ObjectId::new(),
            name: data.name,
            email: data.email,
            age: data.age,
            position: data.position,
            club: data.club,
        };

        store.users().insert_one(&user).await?;

        Ok(user)
    }

    /// Finds a user by id
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(
        store: &Store,
        id: ObjectId,
    ) -> Result<Option<Self>, StoreError> {
        Ok(store.users().find_one(doc! { "_id": id }).await?)
    }

    /// Fetches all users
    pub async fn find_all(store: &Store) -> Result<Vec<Self>, StoreError> {
        let cursor = store.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Fetches all users whose club reference equals the given club id
    pub async fn find_by_club(
        store: &Store,
        club_id: ObjectId,
    ) -> Result<Vec<Self>, StoreError> {
        let cursor = store.users().find(doc! { "club": club_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Updates a user's scalar fields
    ///
    /// Returns the updated document if the user exists, None otherwise.
    /// The club reference is left untouched; see [`User::set_club`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the write
    pub async fn update(
        store: &Store,
        id: ObjectId,
        data: UpdateUser,
    ) -> Result<Option<Self>, StoreError> {
        let updated = store
            .users()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "name": data.name,
                    "email": data.email,
                    "age": data.age,
                    "position": data.position,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    /// Points a user at a club
    ///
    /// Returns the updated document if the user exists, None otherwise.
    /// Only this side of the relationship is written; inserting the user id
    /// into the club's member set is the caller's job.
    pub async fn set_club(
        store: &Store,
        id: ObjectId,
        club_id: ObjectId,
    ) -> Result<Option<Self>, StoreError> {
        let updated = store
            .users()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "club": club_id } })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    /// Deletes a user by id
    ///
    /// Returns true if a user was deleted, false if none matched. Any club
    /// still holding the user's id in its member set is not touched here.
    pub async fn delete(store: &Store, id: ObjectId) -> Result<bool, StoreError> {
        let result = store.users().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
