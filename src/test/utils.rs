// Test utilities shared across unit tests
// Only compiled when running tests

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use crate::services::{AuthService, FestivalService, SubscriptionService, TokenService};
use crate::stores::{CredentialStore, FestivalStore, SubscriptionStore};
use crate::types::db::user;
use crate::types::dto::festival::{CoordinatesRequest, FestivalRequest};
use crate::types::internal::{Identity, NewFestival, Region, Role};

pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Every store and service wired against one in-memory database
pub struct TestServices {
    pub db: DatabaseConnection,
    pub credential_store: Arc<CredentialStore>,
    pub festival_store: Arc<FestivalStore>,
    pub subscription_store: Arc<SubscriptionStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub festival_service: Arc<FestivalService>,
    pub subscription_service: Arc<SubscriptionService>,
}

pub async fn setup_test_services() -> TestServices {
    let db = setup_test_db().await;

    let credential_store = Arc::new(CredentialStore::new(db.clone(), TEST_PEPPER.to_string()));
    let festival_store = Arc::new(FestivalStore::new(db.clone()));
    let subscription_store = Arc::new(SubscriptionStore::new(db.clone()));
    let token_service = Arc::new(TokenService::new(TEST_JWT_SECRET.to_string()));

    let auth_service = Arc::new(AuthService::new(
        credential_store.clone(),
        subscription_store.clone(),
        token_service.clone(),
    ));
    let festival_service = Arc::new(FestivalService::new(festival_store.clone()));
    let subscription_service = Arc::new(SubscriptionService::new(
        subscription_store.clone(),
        festival_store.clone(),
    ));

    TestServices {
        db,
        credential_store,
        festival_store,
        subscription_store,
        token_service,
        auth_service,
        festival_service,
        subscription_service,
    }
}

/// Creates a plain user named `username` with email `<username>@example.com`
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> user::Model {
    CredentialStore::new(db.clone(), TEST_PEPPER.to_string())
        .create_user(
            username,
            &format!("{}@example.com", username),
            "password123",
            Role::User,
        )
        .await
        .expect("Failed to create test user")
}

/// Creates an account with the given role and returns its identity
pub async fn test_identity(services: &TestServices, username: &str, role: Role) -> Identity {
    let user = services
        .credential_store
        .create_user(
            username,
            &format!("{}@example.com", username),
            "password123",
            role,
        )
        .await
        .expect("Failed to create test user");
    Identity::from(&user)
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("Invalid test date")
}

pub fn new_festival(name: &str, region: Region, start: &str, end: &str) -> NewFestival {
    NewFestival {
        name: name.to_string(),
        description: format!("{} description", name),
        location: "München".to_string(),
        region,
        address: "Theresienwiese".to_string(),
        start_date: date(start),
        end_date: date(end),
        image_url: None,
        website: None,
        entry_fee: None,
        latitude: 48.1314,
        longitude: 11.5498,
    }
}

/// Complete festival payload running 2025-09-20..2025-10-05
pub fn festival_request(name: &str, region: &str) -> FestivalRequest {
    FestivalRequest {
        name: Some(name.to_string()),
        description: Some(format!("{} description", name)),
        location: Some("München".to_string()),
        region: Some(region.to_string()),
        address: Some("Theresienwiese".to_string()),
        start_date: Some("2025-09-20".to_string()),
        end_date: Some("2025-10-05".to_string()),
        image_url: None,
        website: None,
        entry_fee: None,
        coordinates: Some(CoordinatesRequest {
            latitude: Some(48.1314),
            longitude: Some(11.5498),
        }),
    }
}
