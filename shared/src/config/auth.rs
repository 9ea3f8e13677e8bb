//! Authentication token configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use super::ConfigError;

/// Smallest HMAC key accepted for HS512 signing (512 bits)
pub const MIN_SIGNING_KEY_BYTES: usize = 64;

/// JWT authentication configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign access tokens
    pub key: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expires_in_minutes")]
    pub access_token_expires_in_minutes: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_expires_in_days")]
    pub refresh_token_expires_in_days: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_expires_in_minutes", &self.access_token_expires_in_minutes)
            .field("refresh_token_expires_in_days", &self.refresh_token_expires_in_days)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            issuer: String::from("kanban-board"),
            audience: String::from("kanban-board-client"),
            access_token_expires_in_minutes: default_access_token_expires_in_minutes(),
            refresh_token_expires_in_days: default_refresh_token_expires_in_days(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a signing key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_*` environment variables, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            key: env::var("JWT_KEY").map_err(|_| ConfigError::Missing {
                key: "JWT_KEY".to_string(),
            })?,
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            access_token_expires_in_minutes: parse_var(
                "JWT_ACCESS_TOKEN_EXPIRES_IN_MINUTES",
                defaults.access_token_expires_in_minutes,
            )?,
            refresh_token_expires_in_days: parse_var(
                "JWT_REFRESH_TOKEN_EXPIRES_IN_DAYS",
                defaults.refresh_token_expires_in_days,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Set the issuer and audience
    pub fn with_issuer_and_audience(
        mut self,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expires_in_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expires_in_days = days;
        self
    }

    /// Check the configuration can be used to sign and rotate tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_KEY".to_string(),
                reason: "signing key must not be empty".to_string(),
            });
        }
        if self.key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::Invalid {
                key: "JWT_KEY".to_string(),
                reason: format!("signing key must be at least {} bytes", MIN_SIGNING_KEY_BYTES),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_ISSUER".to_string(),
                reason: "issuer must not be empty".to_string(),
            });
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_AUDIENCE".to_string(),
                reason: "audience must not be empty".to_string(),
            });
        }
        if self.access_token_expires_in_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_EXPIRES_IN_MINUTES".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.refresh_token_expires_in_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_TOKEN_EXPIRES_IN_DAYS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var(name: &str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: name.to_string(),
            reason: format!("'{}' is not an integer", raw),
        }),
        Err(_) => Ok(default),
    }
}

fn default_access_token_expires_in_minutes() -> i64 {
    15
}

fn default_refresh_token_expires_in_days() -> i64 {
    7
}
