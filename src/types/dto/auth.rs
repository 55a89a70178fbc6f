use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::types::dto::subscription::SubscriptionsDto;
use crate::types::internal::{Identity, Subscriptions};

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address used at registration
    pub email: String,

    pub password: String,
}

/// Public projection of a user. Never carries the password hash.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,

    /// "user" or "admin"
    pub role: String,

    pub subscriptions: SubscriptionsDto,
}

impl UserResponse {
    pub fn new(identity: &Identity, subscriptions: Subscriptions) -> Self {
        Self {
            id: identity.user_id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role.to_string(),
            subscriptions: subscriptions.into(),
        }
    }
}

/// Response model for register and login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,

    /// Bearer token, valid for 7 days
    pub token: String,

    pub user: UserResponse,
}

/// API response for register endpoint
#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Account created, token provided
    #[oai(status = 201)]
    Created(Json<AuthResponse>),
}
