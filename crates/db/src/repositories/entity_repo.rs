//! Repository for versioned entity tables.
//!
//! Every payload kind gets its own table with the same layout (see the
//! `products` migration), so the table name is a parameter. Table names come
//! from [`Payload::TABLE`](strata_core::Payload::TABLE) constants, never from
//! user input.

use sqlx::PgPool;
use strata_core::types::{DbId, LogicalKey};
use strata_core::{NewEntity, StoredEntity};

use crate::models::entity::EntityRow;

/// Column list shared across queries. `json_doc` is cast back to text so the
/// payload codec sees the document as stored.
const COLUMNS: &str = "id, pk_id, json_doc::text AS json_doc, updated_by, updated_date, \
    is_valid, is_visible, is_deleted, base_version_id, version_id, is_latest_version, status_id";

/// Provides CRUD operations over one versioned entity table.
pub struct EntityRepo;

impl EntityRepo {
    /// List every row in id order.
    pub async fn list(pool: &PgPool, table: &str) -> Result<Vec<EntityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {table} ORDER BY id");
        sqlx::query_as::<_, EntityRow>(&query).fetch_all(pool).await
    }

    /// List all versions of one logical key in id order.
    pub async fn list_by_key(
        pool: &PgPool,
        table: &str,
        pk_id: LogicalKey,
    ) -> Result<Vec<EntityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {table} WHERE pk_id = $1 ORDER BY id");
        sqlx::query_as::<_, EntityRow>(&query)
            .bind(pk_id)
            .fetch_all(pool)
            .await
    }

    /// Find a row by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        table: &str,
        id: DbId,
    ) -> Result<Option<EntityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1");
        sqlx::query_as::<_, EntityRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new version row. Returns the created row.
    pub async fn create(
        pool: &PgPool,
        table: &str,
        input: &NewEntity,
    ) -> Result<EntityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table}
                (pk_id, json_doc, updated_by, updated_date, is_valid, is_visible,
                 is_deleted, base_version_id, version_id, is_latest_version, status_id)
             VALUES ($1, $2::jsonb, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntityRow>(&query)
            .bind(input.pk_id)
            .bind(&input.json_doc)
            .bind(&input.updated_by)
            .bind(input.updated_date)
            .bind(input.is_valid)
            .bind(input.is_visible)
            .bind(input.is_deleted)
            .bind(input.base_version_id)
            .bind(input.version_id)
            .bind(input.is_latest_version)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite a row and stamp `updated_date`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        table: &str,
        id: DbId,
        input: &StoredEntity,
    ) -> Result<Option<EntityRow>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET
                pk_id = $2,
                json_doc = $3::jsonb,
                updated_by = $4,
                updated_date = NOW(),
                is_valid = $5,
                is_visible = $6,
                is_deleted = $7,
                base_version_id = $8,
                version_id = $9,
                is_latest_version = $10,
                status_id = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntityRow>(&query)
            .bind(id)
            .bind(input.pk_id)
            .bind(&input.json_doc)
            .bind(&input.updated_by)
            .bind(input.is_valid)
            .bind(input.is_visible)
            .bind(input.is_deleted)
            .bind(input.base_version_id)
            .bind(input.version_id)
            .bind(input.is_latest_version)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a row by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, table: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
