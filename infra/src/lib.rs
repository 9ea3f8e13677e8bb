//! # Infrastructure Layer
//!
//! Concrete implementations of the core's external collaborators.
//!
//! - **Database**: PostgreSQL identity store over the ASP.NET Identity tables using SQLx

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, PgIdentityStore};

use kb_core::{DomainError, TokenService, TokenServiceConfig};
use kb_shared::AppConfig;

/// Connect to the database and build a token service backed by it.
///
/// Validates the JWT configuration before any connection is opened.
pub async fn connect_token_service(
    config: &AppConfig,
) -> Result<(DatabasePool, TokenService<PgIdentityStore>), InfrastructureError> {
    config
        .jwt
        .validate()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    let pool = DatabasePool::new(&config.database).await?;
    let store = PgIdentityStore::new(pool.get_pool().clone());
    let service = TokenService::new(store, TokenServiceConfig::from(&config.jwt))?;

    tracing::info!(environment = %config.environment, "Token service initialized");
    Ok((pool, service))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Core service construction error
    #[error(transparent)]
    Domain(#[from] DomainError),
}
