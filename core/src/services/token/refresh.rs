//! Opaque refresh token rotation and validation

use chrono::{DateTime, Datelike, Duration, Utc};
use std::sync::Arc;

use kb_shared::config::ConfigError;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{RefreshTokenValue, REFRESH_TOKEN_NAME, REFRESH_TOKEN_PROVIDER};
use crate::errors::{DomainError, StoreError, TokenError};
use crate::repositories::IdentityStore;

use super::config::RefreshTokenConfig;

// The stored timestamp has a four-digit year.
const MAX_EXPIRY_YEAR: i32 = 9999;

/// Issues, rotates and validates the single refresh token each identity holds.
///
/// Rotation clears the identity's slot before writing the new value, so at
/// most one refresh token is valid per user. Concurrent rotations for the
/// same identity are last-write-wins.
pub struct RefreshTokenManager<S: IdentityStore> {
    store: Arc<S>,
    lifetime: Duration,
}

impl<S: IdentityStore> RefreshTokenManager<S> {
    /// Creates a new manager
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` if the lifetime is not positive or out of range
    pub fn new(store: Arc<S>, config: RefreshTokenConfig) -> Result<Self, DomainError> {
        if config.lifetime_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "lifetime_days".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        let lifetime = Duration::try_days(config.lifetime_days).ok_or_else(|| ConfigError::Invalid {
            key: "lifetime_days".to_string(),
            reason: format!("{} days is out of range", config.lifetime_days),
        })?;

        Ok(Self { store, lifetime })
    }

    /// Refresh token lifetime
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Replaces the identity's refresh token with a fresh one
    pub async fn rotate(&self, identity: &Identity) -> Result<RefreshTokenValue, DomainError> {
        self.rotate_at(identity, Utc::now()).await
    }

    /// Replaces the identity's refresh token with one expiring at `now + lifetime`.
    ///
    /// The value is only returned once the store accepted it; on
    /// `StoreError::Write` no refresh token has been issued. An expiry that
    /// overflows or needs more than a four-digit year fails with
    /// `TokenGenerationFailed` before the store is touched.
    pub async fn rotate_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<RefreshTokenValue, DomainError> {
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .filter(|at| at.year() <= MAX_EXPIRY_YEAR)
            .ok_or_else(|| {
                tracing::error!(
                    user_id = identity.id,
                    lifetime = %self.lifetime,
                    "Refresh token expiry out of range"
                );
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        self.store
            .remove_stored_token(identity, REFRESH_TOKEN_PROVIDER, REFRESH_TOKEN_NAME)
            .await
            .map_err(|e| write_failure(identity, e))?;

        let value = RefreshTokenValue::generate(expires_at);

        self.store
            .set_stored_token(
                identity,
                REFRESH_TOKEN_PROVIDER,
                REFRESH_TOKEN_NAME,
                &value.to_string(),
            )
            .await
            .map_err(|e| write_failure(identity, e))?;

        tracing::info!(
            user_id = identity.id,
            expires_at = %value.expires_at,
            "Rotated refresh token"
        );

        Ok(value)
    }

    /// Value currently held for the identity
    pub async fn stored_token(&self, identity: &Identity) -> Result<Option<String>, DomainError> {
        self.store
            .get_stored_token(identity, REFRESH_TOKEN_PROVIDER, REFRESH_TOKEN_NAME)
            .await
            .map_err(|e| {
                tracing::error!(user_id = identity.id, error = %e, "Failed to read refresh token");
                DomainError::Store(e)
            })
    }

    /// Clears the identity's refresh token; a no-op when none is stored
    pub async fn revoke(&self, identity: &Identity) -> Result<(), DomainError> {
        self.store
            .remove_stored_token(identity, REFRESH_TOKEN_PROVIDER, REFRESH_TOKEN_NAME)
            .await
            .map_err(|e| write_failure(identity, e))?;

        tracing::info!(user_id = identity.id, "Revoked refresh token");
        Ok(())
    }

    /// Whether `stored` is a well-formed refresh token that has not expired.
    ///
    /// Never fails: absent, empty, malformed or expired input is `false`.
    pub fn is_valid(&self, stored: Option<&str>) -> bool {
        Self::is_valid_at(stored, Utc::now())
    }

    /// [`is_valid`](Self::is_valid) against an explicit clock; expiry equal to `now` is expired
    pub fn is_valid_at(stored: Option<&str>, now: DateTime<Utc>) -> bool {
        stored
            .filter(|raw| !raw.is_empty())
            .and_then(RefreshTokenValue::parse)
            .map(|value| value.is_live_at(now))
            .unwrap_or(false)
    }
}

fn write_failure(identity: &Identity, err: StoreError) -> DomainError {
    tracing::error!(user_id = identity.id, error = %err, "Failed to persist refresh token");
    match err {
        StoreError::Write { .. } => DomainError::Store(err),
        StoreError::Read { message } => DomainError::Store(StoreError::Write { message }),
    }
}
