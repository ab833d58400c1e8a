/// Document models for clubroster
///
/// This module contains the two document models and their store operations.
///
/// # Models
///
/// - `user`: User documents, each optionally pointing at the club it
///   belongs to
/// - `club`: Club documents, each carrying the member list of user ids
///
/// The two references are maintained manually by the API layer; see the
/// route handlers for the places where both sides are touched.
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
/// let new_user = CreateUser {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     age: 36,
///     position: "midfield".to_string(),
///     club: None,
/// };
///
/// let user = User::create(&store, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod club;
pub mod user;
