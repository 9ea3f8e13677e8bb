//! Unit tests for the in-memory identity store

use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::errors::StoreError;
use crate::repositories::identity::{IdentityStore, InMemoryIdentityStore};

fn alice() -> Identity {
    Identity::new(7, "alice", "Alice", "Lee")
}

#[tokio::test]
async fn test_roles_keep_insertion_order() {
    let store = InMemoryIdentityStore::new();
    store.set_roles(7, ["User", "Admin"]).await;

    let roles = store.get_roles(&alice()).await.unwrap();
    assert_eq!(roles, vec!["User".to_string(), "Admin".to_string()]);
}

#[tokio::test]
async fn test_unknown_user_has_no_roles() {
    let store = InMemoryIdentityStore::new();
    assert!(store.get_roles(&alice()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_token_slots_are_scoped_by_provider_and_name() {
    let store = InMemoryIdentityStore::new();
    let user = alice();

    store.set_stored_token(&user, "RefreshToken", "MyAppRefreshToken", "one").await.unwrap();
    store.set_stored_token(&user, "Other", "MyAppRefreshToken", "two").await.unwrap();

    assert_eq!(
        store.get_stored_token(&user, "RefreshToken", "MyAppRefreshToken").await.unwrap(),
        Some("one".to_string())
    );

    store.remove_stored_token(&user, "RefreshToken", "MyAppRefreshToken").await.unwrap();
    assert_eq!(
        store.get_stored_token(&user, "RefreshToken", "MyAppRefreshToken").await.unwrap(),
        None
    );
    assert_eq!(
        store.get_stored_token(&user, "Other", "MyAppRefreshToken").await.unwrap(),
        Some("two".to_string())
    );
}

#[tokio::test]
async fn test_remove_empty_slot_is_ok() {
    let store = InMemoryIdentityStore::new();
    assert!(store.remove_stored_token(&alice(), "p", "n").await.is_ok());
    assert_eq!(store.token_count().await, 0);
}

#[tokio::test]
async fn test_injected_failures() {
    let store = InMemoryIdentityStore::new();
    let user = alice();

    store.fail_writes(true);
    let err = store.set_stored_token(&user, "p", "n", "v").await.unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }));

    store.fail_writes(false);
    store.fail_reads(true);
    let err = store.get_stored_token(&user, "p", "n").await.unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
}

#[tokio::test]
async fn test_arc_store_delegates() {
    let store: Arc<dyn IdentityStore> = Arc::new(InMemoryIdentityStore::new());
    let user = alice();

    store.set_stored_token(&user, "p", "n", "v").await.unwrap();
    assert_eq!(
        store.get_stored_token(&user, "p", "n").await.unwrap(),
        Some("v".to_string())
    );
}
