//! Repository interfaces for external collaborators.

pub mod identity;

pub use identity::{IdentityStore, InMemoryIdentityStore};
