/// Club endpoints
///
/// # Endpoints
///
/// - `GET /clubs` - List all clubs
/// - `GET /clubs/:id/users` - List the users belonging to a club
/// - `POST /createclub` - Create a club
/// - `PUT /updateclub/:id` - Update a club's scalar fields
///
/// Clubs are never deleted through the API.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use clubroster_shared::models::{
    club::{Club, CreateClub, UpdateClub},
    user::User,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::users::UserRecord;

/// Club record as stored
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRecord {
    /// Club id (hex)
    pub id: String,

    pub club_name: String,
    pub description: String,

    /// Member count as last written; not derived from `users`
    pub number_of_members: i32,

    /// Member set as user ids (hex)
    pub users: Vec<String>,
}

impl From<Club> for ClubRecord {
    fn from(club: Club) -> Self {
        Self {
            id: club.id.to_hex(),
            club_name: club.club_name,
            description: club.description,
            number_of_members: club.number_of_members,
            users: club.users.iter().map(|id| id.to_hex()).collect(),
        }
    }
}

/// Create club request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    pub club_name: String,
    pub description: String,
    pub number_of_members: i32,
}

/// Update club request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubRequest {
    pub club_name: String,
    pub description: String,
    pub number_of_members: i32,
}

/// List all clubs
///
/// # Endpoint
///
/// ```text
/// GET /clubs
/// ```
pub async fn list_clubs(State(state): State<AppState>) -> ApiResult<Json<Vec<ClubRecord>>> {
    let clubs = Club::find_all(&state.store).await?;
    Ok(Json(clubs.into_iter().map(ClubRecord::from).collect()))
}

/// List the users whose club reference equals the given club id
///
/// An id matching no club yields an empty array, not a 404; the listing is
/// a plain filter over the users collection.
///
/// # Endpoint
///
/// ```text
/// GET /clubs/:id/users
/// ```
pub async fn list_club_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<UserRecord>>> {
    let club_id = ObjectId::parse_str(&id)?;

    let members = User::find_by_club(&state.store, club_id).await?;
    Ok(Json(members.into_iter().map(UserRecord::from).collect()))
}

/// Create a club
///
/// The member set starts empty; `numberOfMembers` is stored verbatim.
///
/// # Endpoint
///
/// ```text
/// POST /createclub
/// Content-Type: application/json
///
/// {
///   "clubName": "Alpha",
///   "description": "First club",
///   "numberOfMembers": 0
/// }
/// ```
pub async fn create_club(
    State(state): State<AppState>,
    Json(req): Json<CreateClubRequest>,
) -> ApiResult<Json<ClubRecord>> {
    let club = Club::create(
        &state.store,
        CreateClub {
            club_name: req.club_name,
            description: req.description,
            number_of_members: req.number_of_members,
        },
    )
    .await?;

    Ok(Json(ClubRecord::from(club)))
}

/// Update a club's scalar fields
///
/// The member set is left untouched.
///
/// # Endpoint
///
/// ```text
/// PUT /updateclub/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no club with that id
/// - `500 Internal Server Error`: store failure, including malformed ids
pub async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateClubRequest>,
) -> ApiResult<Json<ClubRecord>> {
    let id = ObjectId::parse_str(&id)?;

    let club = Club::update(
        &state.store,
        id,
        UpdateClub {
            club_name: req.club_name,
            description: req.description,
            number_of_members: req.number_of_members,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no club with id {}", id.to_hex())))?;

    Ok(Json(ClubRecord::from(club)))
}
