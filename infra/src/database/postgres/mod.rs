//! PostgreSQL repository implementations

mod identity_store_impl;

pub use identity_store_impl::PgIdentityStore;
