mod issuer_tests;

use super::{AccessTokenConfig, RefreshTokenConfig, TokenServiceConfig};

pub(super) const TEST_KEY: &[u8] =
    b"test-signing-key-0123456789abcdef-test-signing-key-0123456789abcdef";

pub(super) fn access_config() -> AccessTokenConfig {
    AccessTokenConfig {
        signing_key: TEST_KEY.to_vec(),
        issuer: "kanban-board-api".to_string(),
        audience: "kanban-board-client".to_string(),
        lifetime_minutes: 15,
    }
}

pub(super) fn service_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access: access_config(),
        refresh: RefreshTokenConfig { lifetime_days: 7 },
    }
}
