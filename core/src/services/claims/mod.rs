//! Claim derivation for identities.

mod builder;

pub use builder::ClaimsBuilder;
