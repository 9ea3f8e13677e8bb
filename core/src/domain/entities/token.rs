//! Token entities for JWT access tokens and opaque refresh tokens.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::claims::{ClaimSet, ClaimType};
use crate::errors::TokenError;

/// Login provider slot the refresh token is stored under
pub const REFRESH_TOKEN_PROVIDER: &str = "RefreshToken";

/// Token name slot the refresh token is stored under
pub const REFRESH_TOKEN_NAME: &str = "MyAppRefreshToken";

/// Random bytes in a refresh token secret
pub const REFRESH_SECRET_BYTES: usize = 64;

/// Separator between the expiry and the secret in a refresh token
pub const REFRESH_TOKEN_SEPARATOR: char = '|';

/// JWT payload of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject id
    pub nameid: String,

    /// Username
    pub unique_name: String,

    /// Given name
    pub given_name: String,

    /// Family name
    pub family_name: String,

    /// Roles; a single role is written as a bare string
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "one_or_many")]
    pub role: Vec<String>,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl AccessTokenClaims {
    /// Builds the payload from a claim set.
    ///
    /// Fails with `InvalidClaims` when one of the four identity claims is missing.
    pub fn from_claim_set(
        claims: &ClaimSet,
        issuer: &str,
        audience: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let required = |claim_type: ClaimType| {
            claims
                .first(claim_type)
                .map(str::to_owned)
                .ok_or(TokenError::InvalidClaims)
        };

        Ok(Self {
            nameid: required(ClaimType::NameIdentifier)?,
            unique_name: required(ClaimType::Name)?,
            given_name: required(ClaimType::GivenName)?,
            family_name: required(ClaimType::Surname)?,
            role: claims.values(ClaimType::Role).map(str::to_owned).collect(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        })
    }

    /// Identity claims carried by the token, in emission order
    pub fn claim_set(&self) -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.push(ClaimType::NameIdentifier, &self.nameid);
        claims.push(ClaimType::Name, &self.unique_name);
        claims.push(ClaimType::GivenName, &self.given_name);
        claims.push(ClaimType::Surname, &self.family_name);
        for role in &self.role {
            claims.push(ClaimType::Role, role);
        }
        claims
    }

    /// Checks the validity window against `now`; `exp` is exclusive
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Expiry as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

mod one_or_many {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer>(values: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match values.as_slice() {
            [single] => single.serialize(serializer),
            many => many.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        })
    }
}

/// A signed access token together with the payload it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    claims: AccessTokenClaims,
}

impl AccessToken {
    pub(crate) fn new(token: String, claims: AccessTokenClaims) -> Self {
        Self { token, claims }
    }

    /// Compact serialized form
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &AccessTokenClaims {
        &self.claims
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Structured view of a refresh token string `"<expiry>|<base64 secret>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenValue {
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,

    /// Base64 encoded random secret
    pub secret: String,
}

impl RefreshTokenValue {
    /// Creates a token with a fresh secret from the OS random source.
    ///
    /// The expiry is truncated to the 100ns precision of the wire format so the
    /// value survives a format/parse cycle unchanged.
    pub fn generate(expires_at: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; REFRESH_SECRET_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let nanos = expires_at.timestamp_subsec_nanos() / 100 * 100;
        let expires_at = Utc
            .timestamp_opt(expires_at.timestamp(), nanos)
            .single()
            .unwrap_or(expires_at);

        Self {
            expires_at,
            secret: STANDARD.encode(bytes),
        }
    }

    /// Parses a stored or presented value.
    ///
    /// Returns `None` unless the value has a separator, an RFC 3339 timestamp
    /// and a secret that is base64 of exactly [`REFRESH_SECRET_BYTES`] bytes.
    pub fn parse(raw: &str) -> Option<Self> {
        let (timestamp, secret) = raw.split_once(REFRESH_TOKEN_SEPARATOR)?;
        let expires_at = DateTime::parse_from_rfc3339(timestamp)
            .ok()?
            .with_timezone(&Utc);

        let decoded = STANDARD.decode(secret).ok()?;
        if decoded.len() != REFRESH_SECRET_BYTES {
            return None;
        }

        Some(Self {
            expires_at,
            secret: secret.to_string(),
        })
    }

    /// A token is live strictly before its expiry
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Decoded secret bytes
    pub fn secret_bytes(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.secret).ok()
    }
}

impl fmt::Display for RefreshTokenValue {
    /// Round-trip ISO-8601 with seven fractional digits, e.g.
    /// `2025-02-21T17:20:58.1234567Z|<secret>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ticks = (self.expires_at.timestamp_subsec_nanos() / 100).min(9_999_999);
        write!(
            f,
            "{}.{:07}Z{}{}",
            self.expires_at.format("%Y-%m-%dT%H:%M:%S"),
            ticks,
            REFRESH_TOKEN_SEPARATOR,
            self.secret
        )
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,
}
