//! Error types for token issuance, verification and identity store access

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Identity is missing required field: {field}")]
    IdentityIncomplete { field: &'static str },

    #[error("Signing key misconfigured: {message}")]
    Signing { message: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,
}

/// Failures reported by an identity store implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Identity store read failed: {message}")]
    Read { message: String },

    #[error("Identity store write failed: {message}")]
    Write { message: String },
}

impl StoreError {
    /// Build a read failure from any displayable error
    pub fn read(err: impl std::fmt::Display) -> Self {
        StoreError::Read {
            message: err.to_string(),
        }
    }

    /// Build a write failure from any displayable error
    pub fn write(err: impl std::fmt::Display) -> Self {
        StoreError::Write {
            message: err.to_string(),
        }
    }
}
