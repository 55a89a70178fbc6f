use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::{Settings, init_database};
use crate::errors::InternalError;
use crate::services::{AuthService, FestivalService, SubscriptionService, TokenService};
use crate::stores::{CredentialStore, FestivalStore, SubscriptionStore};

/// Stores and services, created once and shared by every API and CLI command
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(settings)
///   ↓ connects and migrates
///   ├─ credential_store / festival_store / subscription_store
///   ├─ token_service
///   └─ auth_service / festival_service / subscription_service
///   ↓ wrapped in Arc<AppData>
///   └─ api::build_routes(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Settings,
    pub credential_store: Arc<CredentialStore>,
    pub festival_store: Arc<FestivalStore>,
    pub subscription_store: Arc<SubscriptionStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub festival_service: Arc<FestivalService>,
    pub subscription_service: Arc<SubscriptionService>,
}

impl AppData {
    /// Connect to `settings.database_url`, run migrations and wire everything up
    pub async fn init(settings: Settings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");
        let db = init_database(&settings.database_url).await?;
        let app_data = Self::with_connection(db, settings);
        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Wire stores and services over an already migrated connection
    pub fn with_connection(db: DatabaseConnection, settings: Settings) -> Self {
        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            settings.password_pepper().to_string(),
        ));
        let festival_store = Arc::new(FestivalStore::new(db.clone()));
        let subscription_store = Arc::new(SubscriptionStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(settings.jwt_secret().to_string()));

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

        Self {
            db,
            settings,
            credential_store,
            festival_store,
            subscription_store,
            token_service,
            auth_service,
            festival_service,
            subscription_service,
        }
    }
}
