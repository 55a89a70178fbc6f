use thiserror::Error;

use crate::services::authorization::Action;

/// Internal error type for store and service operations
///
/// Separates:
/// - Infrastructure errors (Database, Transaction, Crypto) shared by all stores
/// - Input errors (Validation)
/// - Domain errors (Credential, Festival, Subscription, Authorization)
///
/// This error type is NOT exposed via API. Endpoints convert it to `ApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    // ============================================================
    // Infrastructure Errors (shared by all stores)
    // ============================================================

    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Cryptographic operation failed (hashing, token signing, etc.)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    // ============================================================
    // Input Errors
    // ============================================================

    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    // ============================================================
    // Domain-Specific Errors
    // ============================================================

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Festival(#[from] FestivalError),

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Credential store and token errors
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown email or wrong password. Never says which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Token subject no longer resolves to a stored user
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Malformed token, bad signature, or wrong key
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,
}

impl CredentialError {
    /// Create an invalid token error
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}

/// Festival store errors
#[derive(Error, Debug)]
pub enum FestivalError {
    #[error("Festival not found: {0}")]
    NotFound(String),
}

/// Subscription store errors
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Festival already subscribed: {0}")]
    AlreadySubscribed(String),
}

/// Authorization policy errors
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("User {user_id} is not allowed to {action}")]
    Forbidden { user_id: String, action: Action },
}
