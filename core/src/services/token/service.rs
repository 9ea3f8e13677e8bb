//! Login and refresh flows over the claims builder, issuer and refresh manager

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{AccessTokenClaims, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::IdentityStore;
use crate::services::claims::ClaimsBuilder;

use super::config::TokenServiceConfig;
use super::issuer::AccessTokenIssuer;
use super::refresh::RefreshTokenManager;

/// Service issuing access/refresh token pairs
pub struct TokenService<S: IdentityStore> {
    store: Arc<S>,
    claims_builder: ClaimsBuilder,
    issuer: AccessTokenIssuer,
    refresh_tokens: RefreshTokenManager<S>,
}

impl<S: IdentityStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Identity store holding roles and the refresh token slot
    /// * `config` - Signing and lifetime configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` or a signing/configuration error
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Creates a service over a store that is also used elsewhere
    pub fn with_shared_store(store: Arc<S>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Ok(Self {
            issuer: AccessTokenIssuer::new(config.access)?,
            refresh_tokens: RefreshTokenManager::new(Arc::clone(&store), config.refresh)?,
            claims_builder: ClaimsBuilder::new(),
            store,
        })
    }

    pub fn issuer(&self) -> &AccessTokenIssuer {
        &self.issuer
    }

    pub fn refresh_tokens(&self) -> &RefreshTokenManager<S> {
        &self.refresh_tokens
    }

    /// Issues an access token and rotates the refresh token for an authenticated identity.
    ///
    /// Roles are read from the store so the token reflects current membership.
    ///
    /// # Errors
    ///
    /// * `TokenError::IdentityIncomplete` - profile fields missing; nothing is written
    /// * `StoreError::Read` - role lookup failed
    /// * `StoreError::Write` - refresh token could not be persisted
    pub async fn login(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        let roles = self.store.get_roles(identity).await.map_err(|e| {
            tracing::error!(user_id = identity.id, error = %e, "Failed to load roles");
            DomainError::Store(e)
        })?;
        let identity = identity.clone().with_roles(roles);

        let claims = self.claims_builder.build_claims(&identity)?;
        let now = Utc::now();
        let access_token = self.issuer.issue(&claims, now)?;
        let refresh_token = self.refresh_tokens.rotate_at(&identity, now).await?;

        tracing::info!(user_id = identity.id, "Issued token pair");

        Ok(TokenPair {
            access_token: access_token.into_string(),
            refresh_expires_at: refresh_token.expires_at,
            refresh_token: refresh_token.to_string(),
            access_expires_in: self.issuer.lifetime().num_seconds(),
        })
    }

    /// Exchanges a presented refresh token for a new token pair.
    ///
    /// The presented value must be well-formed, unexpired and exactly equal to
    /// the stored one. Success rotates the refresh token, so each value can be
    /// used once.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidRefreshToken` - expired, malformed, mismatched or reused token
    /// * `StoreError::Read` / `StoreError::Write` - store failures
    pub async fn refresh(&self, identity: &Identity, presented: &str) -> Result<TokenPair, DomainError> {
        if !self.refresh_tokens.is_valid(Some(presented)) {
            tracing::warn!(user_id = identity.id, "Rejected malformed or expired refresh token");
            return Err(TokenError::InvalidRefreshToken.into());
        }

        match self.refresh_tokens.stored_token(identity).await? {
            Some(stored) if constant_time_eq(stored.as_bytes(), presented.as_bytes()) => {}
            _ => {
                tracing::warn!(user_id = identity.id, "Refresh token does not match stored value");
                return Err(TokenError::InvalidRefreshToken.into());
            }
        }

        self.login(identity).await
    }

    /// Verifies an access token against the current time
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, DomainError> {
        self.issuer.verify(token, Utc::now())
    }

    /// Drops the identity's refresh token so it can no longer be exchanged
    pub async fn revoke(&self, identity: &Identity) -> Result<(), DomainError> {
        self.refresh_tokens.revoke(identity).await
    }
}
