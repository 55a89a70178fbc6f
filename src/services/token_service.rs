use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use std::fmt;
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::Claims;

/// Issues and validates HS256 bearer tokens
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_days: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_days: 7,
        }
    }

    /// Generate a JWT for the given user_id, valid for 7 days
    pub fn generate_jwt(&self, user_id: &str) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.jwt_expiration_days * 24 * 60 * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))
    }

    /// Validate a JWT and return the claims
    ///
    /// # Returns
    /// * `Err(CredentialError::ExpiredToken)` - Signature valid but past `exp`
    /// * `Err(CredentialError::InvalidToken)` - Malformed, tampered or signed with another key
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken,
            _ => CredentialError::invalid_token(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_days", &self.jwt_expiration_days)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ jwt_expiration: {}days }}",
            self.jwt_expiration_days
        )
    }
}
