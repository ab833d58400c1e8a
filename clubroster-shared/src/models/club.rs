/// Club model and store operations
///
/// This module provides the Club document and its CRUD operations, plus the
/// member-set updates used when users join and leave. Membership lives on
/// the club document itself as an array of user ids with set semantics.
///
/// # Document shape
///
/// ```text
/// {
///     _id: ObjectId,
///     clubName: string,          // also used as an alternate lookup key
///     description: string,
///     numberOfMembers: int32,    // free-standing, never derived from users
///     users: [ObjectId]          // member set, duplicates disallowed
/// }
/// ```
///
/// `numberOfMembers` is whatever the caller last wrote; it is not kept in
/// sync with `users.len()` anywhere in the system.
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use crate::db::store::{Store, StoreError};

/// Club document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    /// Unique club id, generated at insert
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Club name, also used to locate clubs on user reassignment
    pub club_name: String,

    /// Free-form description
    pub description: String,

    /// Member count as last written by a caller
    pub number_of_members: i32,

    /// Member set: ids of users belonging to this club
    #[serde(default)]
    pub users: Vec<ObjectId>,
}

/// Input for creating a new club
///
/// New clubs start with an empty member set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClub {
    pub club_name: String,
    pub description: String,
    pub number_of_members: i32,
}

/// Input for updating a club's scalar fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClub {
    pub club_name: String,
    pub description: String,
    pub number_of_members: i32,
}

impl Club {
    /// Creates a new club in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the write
    pub async fn create(store: &Store, data: CreateClub) -> Result<Self, StoreError> {
        let club = Club {
            id: ObjectId::new(),
            club_name: data.club_name,
            description: data.description,
            number_of_members: data.number_of_members,
            users: Vec::new(),
        };

        store.clubs().insert_one(&club).await?;

        Ok(club)
    }

    /// Finds a club by id
    pub async fn find_by_id(
        store: &Store,
        id: ObjectId,
    ) -> Result<Option<Self>, StoreError> {
        Ok(store.clubs().find_one(doc! { "_id": id }).await?)
    }

    /// Finds a club by its name
    ///
    /// Names are not unique in the store; when several clubs share one, the
    /// first match wins, exactly as the source system's lookup behaved.
    pub async fn find_by_name(
        store: &Store,
        club_name: &str,
    ) -> Result<Option<Self>, StoreError> {
        Ok(store.clubs().find_one(doc! { "clubName": club_name }).await?)
    }

    /// Fetches all clubs
    pub async fn find_all(store: &Store) -> Result<Vec<Self>, StoreError> {
        let cursor = store.clubs().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Updates a club's scalar fields
    ///
    /// Returns the updated document if the club exists, None otherwise.
    /// The member set is never touched by this operation.
    pub async fn update(
        store: &Store,
        id: ObjectId,
        data: UpdateClub,
    ) -> Result<Option<Self>, StoreError> {
        let updated = store
            .clubs()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "clubName": data.club_name,
                    "description": data.description,
                    "numberOfMembers": data.number_of_members,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    /// Inserts a user id into a club's member set
    ///
    /// Uses `$addToSet`, so the insert is idempotent: adding an id that is
    /// already present leaves the set unchanged.
    ///
    /// Returns true if a club matched the id, false otherwise.
    pub async fn add_member(
        store: &Store,
        club_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<bool, StoreError> {
        let result = store
            .clubs()
            .update_one(
                doc! { "_id": club_id },
                doc! { "$addToSet": { "users": user_id } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Removes a user id from a club's member set
    ///
    /// Returns true if a club matched the id, false otherwise. Removing an
    /// id that is not in the set still counts as a match.
    pub async fn remove_member(
        store: &Store,
        club_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<bool, StoreError> {
        let result = store
            .clubs()
            .update_one(doc! { "_id": club_id }, doc! { "$pull": { "users": user_id } })
            .await?;

        Ok(result.matched_count > 0)
    }
}
