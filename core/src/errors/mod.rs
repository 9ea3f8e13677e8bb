//! Domain-specific error types and error handling.

mod types;

pub use types::{StoreError, TokenError};

use kb_shared::ConfigError;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomainError {
    /// Whether the caller must send the user back through authentication
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::InvalidRefreshToken
                    | TokenError::TokenExpired
                    | TokenError::InvalidSignature
                    | TokenError::InvalidTokenFormat
            )
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
