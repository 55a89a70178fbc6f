use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::Role;

/// CredentialStore manages user accounts and password hashes
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and password pepper
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key mixed into every password hash
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password with Argon2id, a fresh random salt and the pepper
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Create a user account
    ///
    /// The password is hashed here, before anything is written. Email is
    /// expected to be normalized by the caller.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The stored user
    /// * `Err(CredentialError::DuplicateUsername | DuplicateEmail)` - Uniqueness violated
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<user::Model, InternalError> {
        let existing = User::find()
            .filter(
                user::Column::Username
                    .eq(username)
                    .or(user::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_existing_user", e))?;

        if let Some(existing) = existing {
            return Err(if existing.username == username {
                CredentialError::DuplicateUsername(username.to_string()).into()
            } else {
                CredentialError::DuplicateEmail(email.to_string()).into()
            });
        }

        let password_hash = self.hash_password(password)?;
        let now = Utc::now().timestamp();

        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique indexes settle a race between two concurrent registrations
        let user = new_user.insert(&self.db).await.map_err(|e| {
            duplicate_from_db_err(&e, username, email)
                .unwrap_or_else(|| InternalError::database("insert_user", e))
        })?;

        tracing::info!(user_id = %user.id, role = %role, "User created");
        Ok(user)
    }

    /// Verify credentials and return the user on success
    ///
    /// An unknown email still costs one Argon2 computation, and both failure
    /// cases return the same error.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;

        let Some(user) = user else {
            self.hash_password(password)?;
            return Err(CredentialError::InvalidCredentials.into());
        };

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| CredentialError::InvalidCredentials)?;

        Ok(user)
    }

    /// Look up a user by id
    ///
    /// # Returns
    /// * `Err(CredentialError::UserNotFound)` - No such user
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        User::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()).into())
    }
}

fn duplicate_from_db_err(err: &DbErr, username: &str, email: &str) -> Option<InternalError> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(if message.contains("email") {
            CredentialError::DuplicateEmail(email.to_string()).into()
        } else {
            CredentialError::DuplicateUsername(username.to_string()).into()
        }),
        _ => None,
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialStore {{ db: <connection>, password_pepper: <redacted> }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    async fn setup_store() -> (DatabaseConnection, CredentialStore) {
        let db = setup_test_db().await;
        let credential_store =
            CredentialStore::new(db.clone(), "test-pepper-for-unit-tests".to_string());
        (db, credential_store)
    }

    #[tokio::test]
    async fn test_create_user_stores_hash_not_password() {
        let (_db, store) = setup_store().await;

        let user = store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        assert_ne!(user.password_hash, "password123");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.role, "user");
    }

    #[tokio::test]
    async fn test_same_password_gives_different_hashes() {
        let (_db, store) = setup_store().await;

        let first = store
            .create_user("anna", "anna@example.com", "samepassword", Role::User)
            .await
            .unwrap();
        let second = store
            .create_user("bernd", "bernd@example.com", "samepassword", Role::User)
            .await
            .unwrap();

        assert_ne!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let (_db, store) = setup_store().await;
        store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        let result = store
            .create_user("anna", "other@example.com", "password123", Role::User)
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (_db, store) = setup_store().await;
        store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        let result = store
            .create_user("anna2", "anna@example.com", "password123", Role::User)
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateEmail(_)))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let (_db, store) = setup_store().await;
        let created = store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        let user = store
            .verify_credentials("anna@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_fail_identically() {
        let (_db, store) = setup_store().await;
        store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        let wrong_password = store
            .verify_credentials("anna@example.com", "wrongpassword")
            .await
            .unwrap_err();
        let unknown_email = store
            .verify_credentials("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(
            unknown_email,
            InternalError::Credential(CredentialError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_other_pepper_cannot_verify() {
        let (db, store) = setup_store().await;
        store
            .create_user("anna", "anna@example.com", "password123", Role::User)
            .await
            .unwrap();

        let other = CredentialStore::new(db, "a-completely-different-pepper".to_string());
        let result = other.verify_credentials("anna@example.com", "password123").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_user_by_id_unknown() {
        let (_db, store) = setup_store().await;

        let result = store.get_user_by_id("missing").await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::UserNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_debug_and_display_redact_pepper() {
        let (db, _store) = setup_store().await;
        let store = CredentialStore::new(db, "super-secret-pepper-value".to_string());

        let debug_output = format!("{:?}", store);
        let display_output = format!("{}", store);

        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains("super-secret-pepper-value"));
        assert!(!display_output.contains("super-secret-pepper-value"));
    }
}
