//! Repository for the `tender` version table.

use sqlx::PgPool;
use tenderflow_core::entity::NewTenderVersion;
use tenderflow_core::types::{EntityId, Version};

use crate::models::tender::TenderRow;

/// Column list shared across queries. `type` is exposed as `service_type`.
const COLUMNS: &str = "id, version, name, description, type AS service_type, status, \
     organization_id, creator_username, created_at, updated_at";

/// Provides versioned access to tenders.
pub struct TenderRepo;

impl TenderRepo {
    /// Insert one version row. The caller chooses both the id and the version;
    /// a duplicate pair fails on `uq_tender_version`.
    pub async fn insert(
        pool: &PgPool,
        id: EntityId,
        input: &NewTenderVersion,
    ) -> Result<TenderRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tender
                (id, version, name, description, type, status, organization_id, creator_username)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(id)
            .bind(input.version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.service_type.as_str())
            .bind(input.status.as_str())
            .bind(input.organization_id)
            .bind(&input.creator_username)
            .fetch_one(pool)
            .await
    }

    /// The highest version row of a tender.
    pub async fn find_latest(pool: &PgPool, id: EntityId) -> Result<Option<TenderRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tender WHERE id = $1 ORDER BY version DESC LIMIT 1");
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One specific version row of a tender.
    pub async fn find_version(
        pool: &PgPool,
        id: EntityId,
        version: Version,
    ) -> Result<Option<TenderRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tender WHERE id = $1 AND version = $2");
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// `None` if the tender has no rows at all.
    pub async fn latest_version(pool: &PgPool, id: EntityId) -> Result<Option<Version>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Version>>("SELECT MAX(version) FROM tender WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Set the status of whichever row is the max version at execution time.
    ///
    /// Returns `None` if the tender has no rows.
    pub async fn update_latest_status(
        pool: &PgPool,
        id: EntityId,
        status: &str,
    ) -> Result<Option<TenderRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tender
             SET status = $2, updated_at = NOW()
             WHERE id = $1
               AND version = (SELECT MAX(version) FROM tender WHERE id = $1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Latest rows created by `username`, ordered by name.
    pub async fn list_by_creator(
        pool: &PgPool,
        username: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TenderRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM (
                 SELECT DISTINCT ON (id) * FROM tender
                 WHERE creator_username = $1
                 ORDER BY id, version DESC
             ) AS latest
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(username)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Latest rows whose status is `Published`, ordered by name.
    ///
    /// An empty `service_types` list disables the filter.
    pub async fn list_published(
        pool: &PgPool,
        service_types: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TenderRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM (
                 SELECT DISTINCT ON (id) * FROM tender
                 ORDER BY id, version DESC
             ) AS latest
             WHERE status = 'Published'
               AND (cardinality($1::text[]) = 0 OR type = ANY($1))
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(service_types)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
