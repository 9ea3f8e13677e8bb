//! Database module - PostgreSQL implementations using SQLx

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::PgIdentityStore;
