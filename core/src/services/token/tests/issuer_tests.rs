//! Unit tests for access token issuance and verification

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode_header, Algorithm};

use crate::domain::entities::identity::Identity;
use crate::errors::{DomainError, TokenError};
use crate::services::claims::ClaimsBuilder;
use crate::services::token::AccessTokenIssuer;

use super::access_config;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap()
}

fn issuer() -> AccessTokenIssuer {
    AccessTokenIssuer::new(access_config()).expect("valid issuer config")
}

fn alice_claims() -> crate::domain::entities::claims::ClaimSet {
    let identity = Identity::new(7, "alice", "Alice", "Lee").with_roles(["User"]);
    ClaimsBuilder::new().build_claims(&identity).unwrap()
}

#[test]
fn test_issue_produces_hs512_compact_token() {
    let token = issuer().issue(&alice_claims(), fixed_now()).unwrap();

    assert_eq!(token.as_str().split('.').count(), 3);
    let header = decode_header(token.as_str()).unwrap();
    assert_eq!(header.alg, Algorithm::HS512);
    assert_eq!(header.typ.as_deref(), Some("JWT"));
}

#[test]
fn test_payload_layout() {
    let now = fixed_now();
    let token = issuer().issue(&alice_claims(), now).unwrap();

    let payload = token.as_str().split('.').nth(1).unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

    assert_eq!(json["nameid"], "7");
    assert_eq!(json["unique_name"], "alice");
    assert_eq!(json["given_name"], "Alice");
    assert_eq!(json["family_name"], "Lee");
    assert_eq!(json["role"], "User");
    assert_eq!(json["iss"], "kanban-board-api");
    assert_eq!(json["aud"], "kanban-board-client");
    assert_eq!(json["iat"], now.timestamp());
    assert_eq!(json["exp"], (now + Duration::minutes(15)).timestamp());
}

#[test]
fn test_verify_within_lifetime() {
    let issuer = issuer();
    let now = fixed_now();
    let token = issuer.issue(&alice_claims(), now).unwrap();

    let claims = issuer.verify(token.as_str(), now).unwrap();
    assert_eq!(&claims, token.claims());
    assert_eq!(claims.claim_set().len(), 5);

    assert!(issuer
        .verify(token.as_str(), now + Duration::minutes(15) - Duration::seconds(1))
        .is_ok());
}

#[test]
fn test_verify_rejects_at_and_after_expiry() {
    let issuer = issuer();
    let now = fixed_now();
    let token = issuer.issue(&alice_claims(), now).unwrap();

    for at in [now + Duration::minutes(15), now + Duration::hours(1)] {
        assert_eq!(
            issuer.verify(token.as_str(), at).unwrap_err(),
            DomainError::Token(TokenError::TokenExpired)
        );
    }
}

#[test]
fn test_verify_rejects_before_issue_time() {
    let issuer = issuer();
    let now = fixed_now();
    let token = issuer.issue(&alice_claims(), now).unwrap();

    assert_eq!(
        issuer.verify(token.as_str(), now - Duration::minutes(1)).unwrap_err(),
        DomainError::Token(TokenError::TokenNotYetValid)
    );
}

#[test]
fn test_verify_rejects_tampered_payload() {
    let issuer = issuer();
    let now = fixed_now();
    let token = issuer.issue(&alice_claims(), now).unwrap();

    let parts: Vec<&str> = token.as_str().split('.').collect();
    let mut payload: Vec<char> = parts[1].chars().collect();
    payload[5] = if payload[5] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}.{}", parts[0], payload.into_iter().collect::<String>(), parts[2]);

    assert!(issuer.verify(&tampered, now).is_err());
}

#[test]
fn test_verify_rejects_foreign_key() {
    let now = fixed_now();
    let token = issuer().issue(&alice_claims(), now).unwrap();

    let mut config = access_config();
    config.signing_key = vec![b'z'; 64];
    let other = AccessTokenIssuer::new(config).unwrap();

    assert_eq!(
        other.verify(token.as_str(), now).unwrap_err(),
        DomainError::Token(TokenError::InvalidSignature)
    );
}

#[test]
fn test_verify_rejects_wrong_audience() {
    let now = fixed_now();
    let token = issuer().issue(&alice_claims(), now).unwrap();

    let mut config = access_config();
    config.audience = "another-client".to_string();
    let other = AccessTokenIssuer::new(config).unwrap();

    assert_eq!(
        other.verify(token.as_str(), now).unwrap_err(),
        DomainError::Token(TokenError::InvalidClaims)
    );
}

#[test]
fn test_verify_rejects_garbage() {
    assert_eq!(
        issuer().verify("not-a-token", fixed_now()).unwrap_err(),
        DomainError::Token(TokenError::InvalidTokenFormat)
    );
}

#[test]
fn test_empty_or_short_key_is_signing_error() {
    let mut config = access_config();
    config.signing_key = Vec::new();
    assert!(matches!(
        AccessTokenIssuer::new(config),
        Err(DomainError::Token(TokenError::Signing { .. }))
    ));

    let mut config = access_config();
    config.signing_key = b"short".to_vec();
    assert!(matches!(
        AccessTokenIssuer::new(config),
        Err(DomainError::Token(TokenError::Signing { .. }))
    ));
}

#[test]
fn test_non_positive_lifetime_rejected() {
    let mut config = access_config();
    config.lifetime_minutes = 0;
    assert!(matches!(AccessTokenIssuer::new(config), Err(DomainError::Config(_))));
}

#[test]
fn test_out_of_range_lifetime_rejected() {
    let mut config = access_config();
    config.lifetime_minutes = i64::MAX / 2;
    assert!(matches!(AccessTokenIssuer::new(config), Err(DomainError::Config(_))));
}

#[test]
fn test_issue_with_overflowing_expiry_fails() {
    let mut config = access_config();
    config.lifetime_minutes = 1_000_000_000_000;
    let issuer = AccessTokenIssuer::new(config).expect("lifetime fits in a duration");

    assert_eq!(
        issuer.issue(&alice_claims(), fixed_now()).unwrap_err(),
        DomainError::Token(TokenError::TokenGenerationFailed)
    );
}
