// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use poem::{Endpoint, test::TestClient};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use std::sync::Arc;

use volksfest_finder::api::build_routes;
use volksfest_finder::app_data::AppData;
use volksfest_finder::config::{MockEnvironment, Settings};
use volksfest_finder::types::internal::Role;

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_settings() -> Settings {
    let env = MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", "integration-test-secret-at-least-32-chars"),
        ("PASSWORD_PEPPER", "integration-pepper"),
    ]);
    Settings::from_env(&env).expect("Failed to build test settings")
}

/// Full route tree over a fresh in-memory database
pub async fn setup_app() -> (TestClient<impl Endpoint>, Arc<AppData>) {
    let app_data = Arc::new(AppData::with_connection(setup_test_db().await, test_settings()));
    (TestClient::new(build_routes(app_data.clone())), app_data)
}

/// Creates an admin directly through the service layer
pub async fn create_admin(app_data: &AppData, username: &str, password: &str) {
    app_data
        .auth_service
        .create_account(username, &format!("{}@example.com", username), password, Role::Admin)
        .await
        .expect("Failed to create admin");
}

pub async fn body_json(response: poem::test::TestResponse) -> Value {
    response
        .0
        .into_body()
        .into_json()
        .await
        .expect("Response body is not JSON")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
