/// Integration tests for the store handle and document models
///
/// These tests require a running MongoDB deployment. The connection URI is
/// read from the MONGODB_URI environment variable; when it is not set, every
/// test skips itself so the suite stays green on machines without a store:
///
/// export MONGODB_URI="mongodb://127.0.0.1:27017"
use clubroster_shared::db::store::{Store, StoreConfig};
use clubroster_shared::models::club::{Club, CreateClub};
use clubroster_shared::models::user::{CreateUser, UpdateUser, User};
use mongodb::bson::oid::ObjectId;
use std::env;

/// Builds a store config from the environment, or None to skip the test
fn test_store_config() -> Option<StoreConfig> {
    let uri = env::var("MONGODB_URI").ok()?;
    Some(StoreConfig {
        uri,
        database: "clubroster_test".to_string(),
        ..Default::default()
    })
}

fn sample_user(club: Option<ObjectId>) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        age: 27,
        position: "keeper".to_string(),
        club,
    }
}

fn sample_club(name: &str) -> CreateClub {
    CreateClub {
        club_name: name.to_string(),
        description: "test club".to_string(),
        number_of_members: 0,
    }
}

#[tokio::test]
async fn test_connect_and_health_check() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };

    let store = Store::connect(config).await.expect("Failed to connect");
    store.health_check().await.expect("Health check failed");
    store.close().await;
}

#[tokio::test]
async fn test_connect_with_unreachable_uri() {
    if env::var("MONGODB_URI").is_err() {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    }

    let config = StoreConfig {
        uri: "mongodb://nonexistent.invalid:27017".to_string(),
        server_selection_timeout_seconds: 2,
        ..Default::default()
    };

    let result = Store::connect(config).await;
    assert!(result.is_err(), "Should fail with unreachable deployment");
}

#[tokio::test]
async fn test_user_crud_roundtrip() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let user = User::create(&store, sample_user(None))
        .await
        .expect("Failed to create user");

    let found = User::find_by_id(&store, user.id)
        .await
        .expect("Lookup failed")
        .expect("User should exist");
    assert_eq!(found.name, "Test User");
    assert_eq!(found.age, 27);
    assert!(found.club.is_none());

    let updated = User::update(
        &store,
        user.id,
        UpdateUser {
            name: "Renamed".to_string(),
            email: "renamed@example.com".to_string(),
            age: 28,
            position: "striker".to_string(),
        },
    )
    .await
    .expect("Update failed")
    .expect("User should exist");
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.age, 28);

    assert!(User::delete(&store, user.id).await.expect("Delete failed"));
    assert!(User::find_by_id(&store, user.id)
        .await
        .expect("Lookup failed")
        .is_none());

    store.close().await;
}

#[tokio::test]
async fn test_find_by_unknown_id_returns_none() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let missing = User::find_by_id(&store, ObjectId::new())
        .await
        .expect("Lookup should not error");
    assert!(missing.is_none());

    store.close().await;
}

#[tokio::test]
async fn test_add_member_is_idempotent() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let club = Club::create(&store, sample_club("Idempotent FC"))
        .await
        .expect("Failed to create club");
    let user_id = ObjectId::new();

    // Adding the same member twice must leave a single entry
    assert!(Club::add_member(&store, club.id, user_id).await.unwrap());
    assert!(Club::add_member(&store, club.id, user_id).await.unwrap());

    let reloaded = Club::find_by_id(&store, club.id)
        .await
        .unwrap()
        .expect("Club should exist");
    assert_eq!(
        reloaded.users.iter().filter(|id| **id == user_id).count(),
        1
    );

    store.close().await;
}

#[tokio::test]
async fn test_remove_member_prunes_set() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let club = Club::create(&store, sample_club("Pruned FC"))
        .await
        .expect("Failed to create club");
    let user_id = ObjectId::new();

    Club::add_member(&store, club.id, user_id).await.unwrap();
    assert!(Club::remove_member(&store, club.id, user_id).await.unwrap());

    let reloaded = Club::find_by_id(&store, club.id)
        .await
        .unwrap()
        .expect("Club should exist");
    assert!(reloaded.users.is_empty());

    // Unknown club id matches nothing
    assert!(!Club::remove_member(&store, ObjectId::new(), user_id)
        .await
        .unwrap());

    store.close().await;
}

#[tokio::test]
async fn test_club_update_leaves_member_set_untouched() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let club = Club::create(&store, sample_club("Scalar FC"))
        .await
        .expect("Failed to create club");
    let member = ObjectId::new();
    Club::add_member(&store, club.id, member).await.unwrap();

    let updated = Club::update(
        &store,
        club.id,
        clubroster_shared::models::club::UpdateClub {
            club_name: "Scalar United".to_string(),
            description: "renamed".to_string(),
            number_of_members: 99,
        },
    )
    .await
    .unwrap()
    .expect("Club should exist");

    assert_eq!(updated.club_name, "Scalar United");
    // numberOfMembers is free-standing: 99 sticks even though one member exists
    assert_eq!(updated.number_of_members, 99);
    assert_eq!(updated.users, vec![member]);

    store.close().await;
}

#[tokio::test]
async fn test_find_by_club_filters_users() {
    let Some(config) = test_store_config() else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let store = Store::connect(config).await.expect("Failed to connect");

    let club = Club::create(&store, sample_club("Filter FC"))
        .await
        .expect("Failed to create club");

    let member = User::create(&store, sample_user(Some(club.id)))
        .await
        .expect("Failed to create member");
    let outsider = User::create(&store, sample_user(None))
        .await
        .expect("Failed to create outsider");

    let members = User::find_by_club(&store, club.id)
        .await
        .expect("Query failed");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, member.id);

    User::delete(&store, member.id).await.unwrap();
    User::delete(&store, outsider.id).await.unwrap();
    store.close().await;
}
