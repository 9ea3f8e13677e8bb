//! PostgreSQL implementation of the IdentityStore trait.
//!
//! Reads roles and the per-user token slot from the ASP.NET Identity tables
//! the rest of the application already maintains (Npgsql schema, so every
//! identifier is quoted):
//!
//! - `"AspNetRoles" ("Id", "Name", ...)`
//! - `"AspNetUserRoles" ("UserId", "RoleId")`
//! - `"AspNetUserTokens" ("UserId", "LoginProvider", "Name", "Value")` keyed by the first three columns

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use kb_core::domain::entities::Identity;
use kb_core::errors::StoreError;
use kb_core::repositories::IdentityStore;

// "UserId" is an `integer` column; ids are bound as i64 and narrowed here.
const SELECT_ROLES: &str = r#"
    SELECT r."Name"
    FROM "AspNetUserRoles" ur
    INNER JOIN "AspNetRoles" r ON r."Id" = ur."RoleId"
    WHERE ur."UserId" = $1::integer
    ORDER BY ur."RoleId"
"#;

const SELECT_TOKEN: &str = r#"
    SELECT "Value"
    FROM "AspNetUserTokens"
    WHERE "UserId" = $1::integer AND "LoginProvider" = $2 AND "Name" = $3
    LIMIT 1
"#;

const UPSERT_TOKEN: &str = r#"
    INSERT INTO "AspNetUserTokens" ("UserId", "LoginProvider", "Name", "Value")
    VALUES ($1::integer, $2, $3, $4)
    ON CONFLICT ("UserId", "LoginProvider", "Name") DO UPDATE SET "Value" = EXCLUDED."Value"
"#;

const DELETE_TOKEN: &str = r#"
    DELETE FROM "AspNetUserTokens"
    WHERE "UserId" = $1::integer AND "LoginProvider" = $2 AND "Name" = $3
"#;

/// PostgreSQL implementation of IdentityStore
pub struct PgIdentityStore {
    /// Database connection pool
    pool: PgPool,
}

impl PgIdentityStore {
    /// Create a new PostgreSQL identity store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(SELECT_ROLES)
            .bind(identity.id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::read(format!("Failed to load roles: {}", e)))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("Name"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::read(format!("Failed to decode role name: {}", e)))
    }

    async fn get_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(SELECT_TOKEN)
            .bind(identity.id)
            .bind(provider)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::read(format!("Failed to load user token: {}", e)))?;

        match row {
            Some(row) => row
                .try_get::<Option<String>, _>("Value")
                .map_err(|e| StoreError::read(format!("Failed to decode user token: {}", e))),
            None => Ok(None),
        }
    }

    async fn set_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(UPSERT_TOKEN)
            .bind(identity.id)
            .bind(provider)
            .bind(name)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write(format!("Failed to save user token: {}", e)))?;

        Ok(())
    }

    async fn remove_stored_token(
        &self,
        identity: &Identity,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(DELETE_TOKEN)
            .bind(identity.id)
            .bind(provider)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write(format!("Failed to remove user token: {}", e)))?;

        tracing::debug!(
            user_id = identity.id,
            removed = result.rows_affected(),
            "Cleared user token slot"
        );
        Ok(())
    }
}
