//! HS512 access token issuance and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use kb_shared::config::{ConfigError, MIN_SIGNING_KEY_BYTES};

use crate::domain::entities::claims::ClaimSet;
use crate::domain::entities::token::{AccessToken, AccessTokenClaims};
use crate::errors::{DomainError, TokenError};

use super::config::AccessTokenConfig;

/// Signs short-lived access tokens and verifies them.
pub struct AccessTokenIssuer {
    issuer: String,
    audience: String,
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenIssuer {
    /// Creates a new issuer
    ///
    /// # Errors
    ///
    /// * `TokenError::Signing` - the key is empty or shorter than 512 bits
    /// * `ConfigError::Invalid` - blank issuer/audience, or a lifetime that is
    ///   non-positive or out of range
    pub fn new(config: AccessTokenConfig) -> Result<Self, DomainError> {
        if config.signing_key.is_empty() {
            return Err(TokenError::Signing {
                message: "signing key is empty".to_string(),
            }
            .into());
        }
        if config.signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(TokenError::Signing {
                message: format!(
                    "HS512 requires at least {} key bytes, got {}",
                    MIN_SIGNING_KEY_BYTES,
                    config.signing_key.len()
                ),
            }
            .into());
        }
        if config.issuer.trim().is_empty() || config.audience.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "issuer/audience".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if config.lifetime_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "lifetime_minutes".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        let lifetime = Duration::try_minutes(config.lifetime_minutes).ok_or_else(|| {
            ConfigError::Invalid {
                key: "lifetime_minutes".to_string(),
                reason: format!("{} minutes is out of range", config.lifetime_minutes),
            }
        })?;

        // Time checks run against the caller's clock in `verify`.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.signing_key),
            decoding_key: DecodingKey::from_secret(&config.signing_key),
            lifetime,
            issuer: config.issuer,
            audience: config.audience,
            validation,
        })
    }

    /// Access token lifetime
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Signs `claims` into a compact JWS valid from `now` until `now + lifetime`
    pub fn issue(&self, claims: &ClaimSet, now: DateTime<Utc>) -> Result<AccessToken, DomainError> {
        let expires_at = now.checked_add_signed(self.lifetime).ok_or_else(|| {
            tracing::error!(lifetime = %self.lifetime, "Access token expiry overflowed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        let payload = AccessTokenClaims::from_claim_set(
            claims,
            &self.issuer,
            &self.audience,
            now,
            expires_at,
        )?;

        let token = encode(&Header::new(Algorithm::HS512), &payload, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        tracing::debug!(
            subject = %payload.nameid,
            roles = payload.role.len(),
            expires_at = payload.exp,
            "Issued access token"
        );

        Ok(AccessToken::new(token, payload))
    }

    /// Verifies the signature, issuer and audience, then the validity window at `now`.
    ///
    /// A token is accepted iff the signature matches and `nbf <= now < exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessTokenClaims, DomainError> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let err = match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                tracing::debug!(error = %e, "Access token rejected");
                DomainError::Token(err)
            })?;

        let claims = data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::TokenExpired.into());
        }
        if now.timestamp() < claims.nbf {
            return Err(TokenError::TokenNotYetValid.into());
        }

        Ok(claims)
    }
}
