/// User endpoints
///
/// This module provides the user CRUD handlers, including the manual
/// bookkeeping that keeps `user.club` and the club's member set pointing at
/// each other. Every multi-step workflow here runs as two independent
/// writes with no transaction: when the second write fails, the first one
/// stays applied. Those windows are stated on each handler and pinned by
/// the integration tests.
///
/// # Endpoints
///
/// - `GET /` - List user views
/// - `GET /get/:id` - Get one user view
/// - `POST /createuser` - Create user, optionally linking a club by id
/// - `PUT /updateuser/:id` - Update user, optionally reassigning by club name
/// - `DELETE /deleteuser/:id` - Delete user and unlink from its club
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use clubroster_shared::models::{
    club::Club,
    user::{CreateUser, UpdateUser, User},
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User view returned by the listing and single-get endpoints
///
/// The club reference is resolved to the club's name (empty string when the
/// user has no club or the referenced club no longer exists), and age is
/// rendered as a string, matching the wire format of the service this
/// replaces.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    /// User id (hex)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Age, serialized as a string
    pub age: String,

    /// Name of the user's club, or "" when none
    pub club: String,

    /// Position within the club
    pub position: String,
}

impl UserView {
    fn new(user: User, club_name: String) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            age: user.age.to_string(),
            club: club_name,
            position: user.position,
        }
    }
}

/// Raw user record as stored, returned by the create/update/delete-adjacent
/// endpoints and the club member listing
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id (hex)
    pub id: String,

    pub name: String,
    pub email: String,
    pub age: i32,
    pub position: String,

    /// Club id (hex), absent when the user has no club
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            age: user.age,
            position: user.position,
            club: user.club.map(|id| id.to_hex()),
        }
    }
}

/// Create user request
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub position: String,

    /// Id (hex) of the club to join on creation
    pub club: Option<String>,
}

/// Update user request
///
/// Scalar fields are always written; the club, when given, is located by
/// name rather than id.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub position: String,

    /// Name of the club to reassign the user to
    #[serde(rename = "clubName")]
    pub club_name: Option<String>,
}

/// Confirmation body for deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Resolves a club reference to its name; "" when there is no reference or
/// the club is gone (a stale reference is tolerated on read)
async fn resolve_club_name(
    state: &AppState,
    club: Option<ObjectId>,
) -> Result<String, ApiError> {
    match club {
        Some(club_id) => Ok(Club::find_by_id(&state.store, club_id)
            .await?
            .map(|club| club.club_name)
            .unwrap_or_default()),
        None => Ok(String::new()),
    }
}

/// List all users as views
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    let users = User::find_all(&state.store).await?;

    let mut views = Vec::with_capacity(users.len());
    for user in users {
        let club_name = resolve_club_name(&state, user.club).await?;
        views.push(UserView::new(user, club_name));
    }

    Ok(Json(views))
}

/// Get one user as a view
///
/// # Endpoint
///
/// ```text
/// GET /get/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that id
/// - `500 Internal Server Error`: store failure, including malformed ids
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let id = ObjectId::parse_str(&id)?;

    let user = User::find_by_id(&state.store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no user with id {}", id.to_hex())))?;

    let club_name = resolve_club_name(&state, user.club).await?;
    Ok(Json(UserView::new(user, club_name)))
}

/// Create a user
///
/// When a club id is given, the user id is also inserted into that club's
/// member set (`$addToSet`, so running the link twice leaves one entry).
/// The insert and the link are two independent writes: if the club does not
/// exist, this returns 404 and the user row persists.
///
/// # Endpoint
///
/// ```text
/// POST /createuser
/// Content-Type: application/json
///
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "age": 36,
///   "position": "midfield",
///   "club": "65f0c0ffee..."
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: club id given but no such club (user already created)
/// - `500 Internal Server Error`: store failure
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserRecord>> {
    let club_id = match &req.club {
        Some(raw) => Some(ObjectId::parse_str(raw)?),
        None => None,
    };

    // TODO: wrap the insert and the member-set link in a multi-document
    // transaction once the deployment runs a replica set
    let user = User::create(
        &state.store,
        CreateUser {
            name: req.name,
            email: req.email,
            age: req.age,
            position: req.position,
            club: club_id,
        },
    )
    .await?;

    if let Some(club_id) = club_id {
        let linked = Club::add_member(&state.store, club_id, user.id).await?;
        if !linked {
            return Err(ApiError::NotFound(format!(
                "no club with id {}",
                club_id.to_hex()
            )));
        }
    }

    Ok(Json(UserRecord::from(user)))
}

/// Update a user
///
/// Scalar fields are always rewritten. When a club name is given, the club
/// is located by name, the user id is added to its member set and the
/// user's club reference repointed. Reassignment only adds: a previous
/// club, if any, keeps this user in its member list. The scalar write and
/// the club writes are independent, so an unknown club name returns 404
/// with the scalar update already applied.
///
/// # Endpoint
///
/// ```text
/// PUT /updateuser/:id
/// Content-Type: application/json
///
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "age": 37,
///   "position": "striker",
///   "clubName": "Beta"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that id, or no club with that name
/// - `500 Internal Server Error`: store failure, including malformed ids
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserRecord>> {
    let id = ObjectId::parse_str(&id)?;

    let updated = User::update(
        &state.store,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
            age: req.age,
            position: req.position,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no user with id {}", id.to_hex())))?;

    let Some(club_name) = req.club_name else {
        return Ok(Json(UserRecord::from(updated)));
    };

    let club = Club::find_by_name(&state.store, &club_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no club named {}", club_name)))?;

    Club::add_member(&state.store, club.id, id).await?;

    let repointed = User::set_club(&state.store, id, club.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no user with id {}", id.to_hex())))?;

    Ok(Json(UserRecord::from(repointed)))
}

/// Delete a user
///
/// When the user holds a club reference, its id is also pulled from that
/// club's member set. The delete and the unlink are independent writes: a
/// missing club returns 404 with the user already gone.
///
/// # Endpoint
///
/// ```text
/// DELETE /deleteuser/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that id, or its club no longer exists
/// - `500 Internal Server Error`: store failure, including malformed ids
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = ObjectId::parse_str(&id)?;

    let user = User::find_by_id(&state.store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no user with id {}", id.to_hex())))?;

    User::delete(&state.store, id).await?;

    if let Some(club_id) = user.club {
        let unlinked = Club::remove_member(&state.store, club_id, id).await?;
        if !unlinked {
            return Err(ApiError::NotFound(format!(
                "no club with id {}",
                club_id.to_hex()
            )));
        }
    }

    Ok(Json(MessageResponse {
        message: format!("user {} deleted", id.to_hex()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(club: Option<ObjectId>) -> User {
        User {
            id: ObjectId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            age: 36,
            position: "midfield".to_string(),
            club,
        }
    }

    #[test]
    fn test_view_renders_age_as_string() {
        let view = UserView::new(sample_user(None), String::new());
        assert_eq!(view.age, "36");
        assert_eq!(view.club, "");
    }

    #[test]
    fn test_view_carries_club_name() {
        let view = UserView::new(sample_user(Some(ObjectId::new())), "Alpha".to_string());
        assert_eq!(view.club, "Alpha");
    }

    #[test]
    fn test_record_omits_missing_club() {
        let record = UserRecord::from(sample_user(None));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("club").is_none());
        assert_eq!(json["age"], 36);
    }

    #[test]
    fn test_record_carries_club_hex() {
        let club_id = ObjectId::new();
        let record = UserRecord::from(sample_user(Some(club_id)));
        assert_eq!(record.club.as_deref(), Some(club_id.to_hex().as_str()));
    }

    #[test]
    fn test_update_request_uses_club_name_key() {
        let json = r#"{"name":"Ada","email":"ada@example.com","age":36,"position":"midfield","clubName":"Beta"}"#;
        let req: UpdateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.club_name.as_deref(), Some("Beta"));
    }

    #[test]
    fn test_update_request_club_name_optional() {
        let json = r#"{"name":"Ada","email":"ada@example.com","age":36,"position":"midfield"}"#;
        let req: UpdateUserRequest = serde_json::from_str(json).unwrap();
        assert!(req.club_name.is_none());
    }
}
