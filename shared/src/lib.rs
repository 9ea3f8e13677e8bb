//! Shared configuration and logging setup for the KanbanBoard server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (JWT, database, environment, logging)
//! - Tracing subscriber initialisation

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
};
pub use logging::init_tracing;
