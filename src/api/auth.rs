use poem_openapi::{OpenApi, Tags, payload::Json};
use std::sync::Arc;

use crate::api::helpers::{BearerAuth, authenticate};
use crate::errors::ApiError;
use crate::services::{AuthService, SubscriptionService};
use crate::types::dto::auth::{
    AuthResponse, LoginRequest, RegisterApiResponse, RegisterRequest, UserResponse,
};
use crate::types::internal::AuthSession;

/// Account endpoints: register, login, current user
pub struct UserApi {
    auth_service: Arc<AuthService>,
    subscription_service: Arc<SubscriptionService>,
}

impl UserApi {
    pub fn new(auth_service: Arc<AuthService>, subscription_service: Arc<SubscriptionService>) -> Self {
        Self {
            auth_service,
            subscription_service,
        }
    }
}

/// API tags for account endpoints
#[derive(Tags)]
enum UserTags {
    /// Registration, login and the current user
    Users,
}

fn auth_response(message: &str, session: AuthSession) -> AuthResponse {
    AuthResponse {
        message: message.to_string(),
        user: UserResponse::new(&session.identity, session.subscriptions),
        token: session.token,
    }
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// Create an account and receive a bearer token
    #[oai(path = "/register", method = "post", tag = "UserTags::Users")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<RegisterApiResponse, ApiError> {
        let session = self
            .auth_service
            .register(&body.username, &body.email, &body.password)
            .await?;

        Ok(RegisterApiResponse::Created(Json(auth_response(
            "User registered successfully",
            session,
        ))))
    }

    /// Login with email and password to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "UserTags::Users")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<AuthResponse>, ApiError> {
        let session = self.auth_service.login(&body.email, &body.password).await?;
        Ok(Json(auth_response("Login successful", session)))
    }

    /// Current user with subscriptions, for restoring client state
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let subscriptions = self.subscription_service.get_subscriptions(&identity).await?;
        Ok(Json(UserResponse::new(&identity, subscriptions)))
    }
}
