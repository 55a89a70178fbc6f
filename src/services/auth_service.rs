use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::TokenService;
use crate::stores::{CredentialStore, SubscriptionStore};
use crate::types::db::user;
use crate::types::internal::{AuthSession, Identity, Role};

/// Account flows: register, login and token authentication
pub struct AuthService {
    credential_store: Arc<CredentialStore>,
    subscription_store: Arc<SubscriptionStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        subscription_store: Arc<SubscriptionStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            credential_store,
            subscription_store,
            token_service,
        }
    }

    /// Create a plain user account and sign it in
    ///
    /// # Returns
    /// * `Err(InternalError::Validation)` - Blank field or email without '@'
    /// * `Err(CredentialError::DuplicateUsername | DuplicateEmail)` - Already taken
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, InternalError> {
        let user = self.create_account(username, email, password, Role::User).await?;
        self.session_for(&user).await
    }

    /// Create an account with an explicit role. Only the command line creates admins.
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<user::Model, InternalError> {
        let username = username.trim();
        let email = normalize_email(email);

        let mut missing = Vec::new();
        if username.is_empty() {
            missing.push("username");
        }
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(InternalError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if !email.contains('@') {
            return Err(InternalError::validation("Email address must contain '@'"));
        }

        self.credential_store
            .create_user(username, &email, password, role)
            .await
    }

    /// Sign in with email and password
    ///
    /// # Returns
    /// * `Err(CredentialError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, InternalError> {
        let result = self
            .credential_store
            .verify_credentials(&normalize_email(email), password)
            .await;

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                self.session_for(&user).await
            }
            Err(e) => {
                tracing::info!(reason = %e, "Login failed");
                Err(e)
            }
        }
    }

    /// Resolve a bearer token to the identity of a stored user
    ///
    /// # Returns
    /// * `Err(CredentialError::InvalidToken | ExpiredToken)` - Token rejected
    /// * `Err(CredentialError::UserNotFound)` - Subject no longer exists
    pub async fn authenticate(&self, token: &str) -> Result<Identity, InternalError> {
        if token.trim().is_empty() {
            return Err(CredentialError::invalid_token("missing token").into());
        }

        let claims = self.token_service.validate_jwt(token)?;
        let user = self.credential_store.get_user_by_id(&claims.sub).await?;
        Ok(Identity::from(&user))
    }

    async fn session_for(&self, user: &user::Model) -> Result<AuthSession, InternalError> {
        let token = self.token_service.generate_jwt(&user.id)?;
        let subscriptions = self.subscription_store.get_subscriptions(&user.id).await?;

        Ok(AuthSession {
            token,
            identity: Identity::from(user),
            subscriptions,
        })
    }
}

/// Emails are stored and compared trimmed and lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
