//! Domain entities representing core business objects.

pub mod claims;
pub mod identity;
pub mod token;

// Re-export commonly used types
pub use claims::{Claim, ClaimSet, ClaimType};
pub use identity::Identity;
pub use token::{
    AccessToken, AccessTokenClaims, RefreshTokenValue, TokenPair,
    REFRESH_SECRET_BYTES, REFRESH_TOKEN_NAME, REFRESH_TOKEN_PROVIDER, REFRESH_TOKEN_SEPARATOR,
};
