//! Business services containing the token issuance logic.

pub mod claims;
pub mod token;

// Re-export commonly used types
pub use claims::ClaimsBuilder;
pub use token::{
    AccessTokenConfig, AccessTokenIssuer, RefreshTokenConfig, RefreshTokenManager, TokenService,
    TokenServiceConfig,
};
