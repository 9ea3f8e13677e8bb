//! Integration tests for the token subsystem through its public API

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use kb_core::{
        DomainError, Identity, IdentityStore, StoreError, TokenError, TokenService,
        TokenServiceConfig,
    };
    use kb_shared::JwtConfig;

    /// Store that records every call so the rotation order can be checked
    #[derive(Default)]
    struct RecordingStore {
        roles: HashMap<i64, Vec<String>>,
        tokens: Mutex<HashMap<(i64, String, String), String>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IdentityStore for RecordingStore {
        async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, StoreError> {
            self.calls.lock().unwrap().push("get_roles");
            Ok(self.roles.get(&identity.id).cloned().unwrap_or_default())
        }

        async fn get_stored_token(
            &self,
            identity: &Identity,
            provider: &str,
            name: &str,
        ) -> Result<Option<String>, StoreError> {
            self.calls.lock().unwrap().push("get");
            let tokens = self.tokens.lock().unwrap();
            Ok(tokens
                .get(&(identity.id, provider.to_string(), name.to_string()))
                .cloned())
        }

        async fn set_stored_token(
            &self,
            identity: &Identity,
            provider: &str,
            name: &str,
            value: &str,
        ) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("set");
            self.tokens.lock().unwrap().insert(
                (identity.id, provider.to_string(), name.to_string()),
                value.to_string(),
            );
            Ok(())
        }

        async fn remove_stored_token(
            &self,
            identity: &Identity,
            provider: &str,
            name: &str,
        ) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("remove");
            self.tokens
                .lock()
                .unwrap()
                .remove(&(identity.id, provider.to_string(), name.to_string()));
            Ok(())
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig::new("integration-signing-key-".repeat(4))
            .with_issuer_and_audience("kanban-board-api", "kanban-board-client")
    }

    fn service() -> (Arc<RecordingStore>, TokenService<RecordingStore>) {
        let mut store = RecordingStore::default();
        store.roles.insert(7, vec!["User".to_string()]);
        let store = Arc::new(store);
        let service =
            TokenService::with_shared_store(Arc::clone(&store), TokenServiceConfig::from(&jwt_config()))
                .unwrap();
        (store, service)
    }

    #[tokio::test]
    async fn test_login_removes_before_writing() {
        let (store, service) = service();
        service.login(&Identity::new(7, "alice", "Alice", "Lee")).await.unwrap();

        assert_eq!(store.calls(), vec!["get_roles", "remove", "set"]);
    }

    #[tokio::test]
    async fn test_refresh_uses_fixed_token_slot() {
        let (store, service) = service();
        let identity = Identity::new(7, "alice", "Alice", "Lee");

        let pair = service.login(&identity).await.unwrap();
        let key = (7, "RefreshToken".to_string(), "MyAppRefreshToken".to_string());
        assert_eq!(
            store.tokens.lock().unwrap().get(&key),
            Some(&pair.refresh_token)
        );

        let next = service.refresh(&identity, &pair.refresh_token).await.unwrap();
        assert_eq!(store.tokens.lock().unwrap().get(&key), Some(&next.refresh_token));
    }

    #[tokio::test]
    async fn test_reused_token_forces_reauthentication() {
        let (_, service) = service();
        let identity = Identity::new(7, "alice", "Alice", "Lee");

        let pair = service.login(&identity).await.unwrap();
        service.refresh(&identity, &pair.refresh_token).await.unwrap();

        let err = service.refresh(&identity, &pair.refresh_token).await.unwrap_err();
        assert_eq!(err, DomainError::Token(TokenError::InvalidRefreshToken));
        assert!(err.requires_reauthentication());
    }

    #[test]
    fn test_short_configured_key_fails_construction() {
        let config = TokenServiceConfig::from(&JwtConfig::new("short"));
        let result = TokenService::new(RecordingStore::default(), config);

        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::Signing { .. }))
        ));
    }
}
