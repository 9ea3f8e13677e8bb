//! In-memory implementation of IdentityStore for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::identity::Identity;
use crate::errors::StoreError;

use super::r#trait::IdentityStore;

type SlotKey = (i64, String, String);

/// In-memory identity store.
///
/// Reads and writes can be made to fail on demand to exercise error paths.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    roles: Arc<RwLock<HashMap<i64, Vec<String>>>>,
    tokens: Arc<RwLock<HashMap<SlotKey, String>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryIdentityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign roles to a user id, replacing any existing ones
    pub async fn set_roles<I, S>(&self, user_id: i64, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = self.roles.write().await;
        map.insert(user_id, roles.into_iter().map(Into::into).collect());
    }

    /// Make subsequent reads fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes and removals fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of occupied token slots
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read("simulated read failure"));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write("simulated write failure"));
        }
        Ok(())
    }

    fn key(identity: &Identity, provider: &str, name: &str) -> SlotKey {
        (identity.id, provider.to_string(), name.to_string())
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, StoreError> {
        self.check_read()?;
        let roles = self.roles.read().await;
        Ok(roles.get(&identity.id).cloned().unwrap_or_default())
    }

    async fn get_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&Self::key(identity, provider, name)).cloned())
    }

    async fn set_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut tokens = self.tokens.write().await;
        tokens.insert(Self::key(identity, provider, name), value.to_string());
        Ok(())
    }

    async fn remove_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut tokens = self.tokens.write().await;
        tokens.remove(&Self::key(identity, provider, name));
        Ok(())
    }
}
