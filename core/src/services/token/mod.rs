//! Token service module
//!
//! - HS512 access token issuance and verification
//! - Refresh token rotation and validation
//! - Login/refresh facade over both

mod config;
mod issuer;
mod refresh;
mod service;

#[cfg(test)]
mod tests;

pub use config::{AccessTokenConfig, RefreshTokenConfig, TokenServiceConfig};
pub use issuer::AccessTokenIssuer;
pub use refresh::RefreshTokenManager;
pub use service::TokenService;
