//! Domain layer containing identity, claim and token entities.

pub mod entities;

pub use entities::*;
