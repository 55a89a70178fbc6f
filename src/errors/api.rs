use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::Serialize;
use std::fmt;

use crate::errors::internal::{
    AuthorizationError, CredentialError, FestivalError, InternalError, SubscriptionError,
};

/// Error body returned by every endpoint
#[derive(Object, Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTP error taxonomy shared by all endpoints
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed or missing input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or expired token, or invalid credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not allowed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness violation or duplicate subscription
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Unclassified server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse::new(message)))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorResponse::new(message)))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse::new(message)))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse::new(message)))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse::new(message)))
    }

    /// Generic 500. Never carries internal details.
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(Json(ErrorResponse::new("An internal error occurred")))
    }

    /// HTTP status code of the variant
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalError(_) => 500,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0.message,
        }
    }
}

/// Explicit conversion point from internal errors to API errors.
///
/// Infrastructure failures are logged here and surface as a generic 500.
impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Database { ref operation, .. } => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Transaction { ref operation, .. } => {
                tracing::error!("Transaction error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { ref operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Validation(message) => {
                tracing::debug!("Validation failed: {}", message);
                Self::bad_request(message)
            }

            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::unauthorized("Invalid email or password")
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::conflict("Username already exists")
            }
            InternalError::Credential(CredentialError::DuplicateEmail(_)) => {
                tracing::warn!("Duplicate email attempt");
                Self::conflict("Email address already exists")
            }
            InternalError::Credential(CredentialError::UserNotFound(user_id)) => {
                tracing::debug!("Token subject {} no longer exists", user_id);
                Self::unauthorized("User not found")
            }
            InternalError::Credential(CredentialError::InvalidToken { reason }) => {
                tracing::debug!("Invalid token: {}", reason);
                Self::unauthorized("Invalid or malformed token")
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired token");
                Self::unauthorized("Token has expired")
            }

            InternalError::Festival(FestivalError::NotFound(id)) => {
                tracing::debug!("Festival not found: {}", id);
                Self::not_found("Festival not found")
            }

            InternalError::Subscription(SubscriptionError::AlreadySubscribed(id)) => {
                tracing::debug!("Festival {} already subscribed", id);
                Self::conflict("Festival already subscribed")
            }

            InternalError::Authorization(AuthorizationError::Forbidden { user_id, action }) => {
                tracing::warn!("User {} denied {}", user_id, action);
                Self::forbidden("Access denied. Administrator rights required.")
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
