//! # KanbanBoard Core
//!
//! Authentication token subsystem for the KanbanBoard backend: claim
//! derivation, HS512 access tokens, and single-use rotating refresh tokens
//! persisted through an [`IdentityStore`].

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessToken, AccessTokenClaims, Claim, ClaimSet, ClaimType, Identity, RefreshTokenValue,
    TokenPair,
};
pub use errors::{DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{IdentityStore, InMemoryIdentityStore};
pub use services::{
    AccessTokenConfig, AccessTokenIssuer, ClaimsBuilder, RefreshTokenConfig, RefreshTokenManager,
    TokenService, TokenServiceConfig,
};
