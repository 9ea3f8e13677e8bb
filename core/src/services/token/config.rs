//! Configuration for the token services

use std::fmt;

use kb_shared::JwtConfig;

/// Access token signing configuration
#[derive(Clone)]
pub struct AccessTokenConfig {
    /// HMAC-SHA-512 secret
    pub signing_key: Vec<u8>,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
    /// Access token lifetime in minutes
    pub lifetime_minutes: i64,
}

impl fmt::Debug for AccessTokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenConfig")
            .field("signing_key", &format_args!("<{} bytes>", self.signing_key.len()))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime_minutes", &self.lifetime_minutes)
            .finish()
    }
}

/// Refresh token configuration
#[derive(Debug, Clone, Copy)]
pub struct RefreshTokenConfig {
    /// Refresh token lifetime in days
    pub lifetime_days: i64,
}

impl Default for RefreshTokenConfig {
    fn default() -> Self {
        Self { lifetime_days: 7 }
    }
}

/// Configuration for the token service facade
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    pub access: AccessTokenConfig,
    pub refresh: RefreshTokenConfig,
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access: AccessTokenConfig {
                signing_key: config.key.as_bytes().to_vec(),
                issuer: config.issuer.clone(),
                audience: config.audience.clone(),
                lifetime_minutes: config.access_token_expires_in_minutes,
            },
            refresh: RefreshTokenConfig {
                lifetime_days: config.refresh_token_expires_in_days,
            },
        }
    }
}
