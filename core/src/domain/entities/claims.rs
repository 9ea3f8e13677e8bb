//! Claim model embedded in access tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim types emitted for an identity.
///
/// The wire names are the short JWT names clients already read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// Subject id
    NameIdentifier,
    /// Username
    Name,
    /// Given name
    GivenName,
    /// Family name
    Surname,
    /// Role membership
    Role,
}

impl ClaimType {
    /// JWT payload key for this claim type
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::NameIdentifier => "nameid",
            ClaimType::Name => "unique_name",
            ClaimType::GivenName => "given_name",
            ClaimType::Surname => "family_name",
            ClaimType::Role => "role",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (type, value) assertion about an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_type: ClaimType,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: ClaimType, value: impl Into<String>) -> Self {
        Self {
            claim_type,
            value: value.into(),
        }
    }
}

/// Ordered claims derived for one issuance call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a claim, keeping insertion order
    pub fn push(&mut self, claim_type: ClaimType, value: impl Into<String>) {
        self.claims.push(Claim::new(claim_type, value));
    }

    /// First value of the given type
    pub fn first(&self, claim_type: ClaimType) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// All values of the given type, in order
    pub fn values(&self, claim_type: ClaimType) -> impl Iterator<Item = &str> {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<T: IntoIterator<Item = Claim>>(iter: T) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}
