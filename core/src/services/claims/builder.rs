//! Builds the claim set carried by access tokens

use crate::domain::entities::claims::{ClaimSet, ClaimType};
use crate::domain::entities::identity::Identity;
use crate::errors::TokenError;

/// Derives claims from an identity and its role memberships.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimsBuilder;

impl ClaimsBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Emits subject id, username, given name and family name, then one role
    /// claim per role in the identity's order.
    ///
    /// # Errors
    ///
    /// `TokenError::IdentityIncomplete` if username, first name or last name is
    /// missing or blank.
    pub fn build_claims(&self, identity: &Identity) -> Result<ClaimSet, TokenError> {
        let username = required(&identity.username, "username")?;
        let first_name = required(&identity.first_name, "first_name")?;
        let last_name = required(&identity.last_name, "last_name")?;

        let mut claims = ClaimSet::new();
        claims.push(ClaimType::NameIdentifier, identity.id.to_string());
        claims.push(ClaimType::Name, username);
        claims.push(ClaimType::GivenName, first_name);
        claims.push(ClaimType::Surname, last_name);
        for role in &identity.roles {
            claims.push(ClaimType::Role, role.as_str());
        }

        Ok(claims)
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, TokenError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TokenError::IdentityIncomplete { field }),
    }
}
