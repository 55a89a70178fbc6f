use std::fmt;

use crate::config::EnvironmentProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://volksfest.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Minimum lengths enforced on secrets at startup
const JWT_SECRET_MIN_LENGTH: usize = 32;
const PASSWORD_PEPPER_MIN_LENGTH: usize = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Required secret '{name}' is missing")]
    MissingSecret { name: String },

    #[error("Secret '{name}' must be at least {expected} characters, got {actual}")]
    SecretTooShort {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Setting '{name}' has invalid value '{value}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Process configuration, read once at startup
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Base URL of the API as seen by clients, shown in Swagger UI
    pub public_url: String,

    jwt_secret: String,
    password_pepper: String,
}

impl Settings {
    /// Load settings from the given environment
    ///
    /// # Errors
    /// Returns `SettingsError` if a secret is missing or too short, or PORT is not a number
    pub fn from_env(env: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let jwt_secret = load_secret(env, "JWT_SECRET", JWT_SECRET_MIN_LENGTH)?;
        let password_pepper = load_secret(env, "PASSWORD_PEPPER", PASSWORD_PEPPER_MIN_LENGTH)?;

        let port = match env.get_trimmed("PORT") {
            None => DEFAULT_PORT,
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
                SettingsError::InvalidValue {
                    name: "PORT".to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
        };

        let public_url = env
            .get_trimmed("PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/api", port));

        Ok(Self {
            database_url: env
                .get_trimmed("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: env
                .get_trimmed("HOST")
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            public_url,
            jwt_secret,
            password_pepper,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load_secret(
    env: &dyn EnvironmentProvider,
    name: &str,
    min_length: usize,
) -> Result<String, SettingsError> {
    let value = env.get_var(name).ok_or_else(|| SettingsError::MissingSecret {
        name: name.to_string(),
    })?;

    let actual = value.chars().count();
    if actual < min_length {
        return Err(SettingsError::SecretTooShort {
            name: name.to_string(),
            expected: min_length,
            actual,
        });
    }
    Ok(value)
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("public_url", &self.public_url)
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}
