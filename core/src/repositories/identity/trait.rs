//! Identity store trait: the narrow slice of user management the token subsystem needs.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::errors::StoreError;

/// Role lookup plus a per-user key-value token slot.
///
/// Slots are keyed by (identity, provider, name). The same table is shared
/// with unrelated features, so implementations must only touch the slot they
/// are asked for.
///
/// # Consistency
/// The token subsystem removes a slot and then writes it again during rotation.
/// Any transactional guarantee across those two calls belongs to the
/// implementation.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Role names for the identity, in store order
    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, StoreError>;

    /// Value held in the slot, or `None` if empty
    async fn get_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Create or overwrite the slot
    async fn set_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Clear the slot; succeeds when it is already empty
    async fn remove_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: IdentityStore + ?Sized> IdentityStore for Arc<S> {
    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, StoreError> {
        (**self).get_roles(identity).await
    }

    async fn get_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        (**self).get_stored_token(identity, provider, name).await
    }

    async fn set_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        (**self).set_stored_token(identity, provider, name, value).await
    }

    async fn remove_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        (**self).remove_stored_token(identity, provider, name).await
    }
}
