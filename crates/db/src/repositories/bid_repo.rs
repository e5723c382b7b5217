//! Repository for the `bid` version table.

use sqlx::PgPool;
use tenderflow_core::entity::NewBidVersion;
use tenderflow_core::types::{EntityId, Version};

use crate::models::bid::BidRow;

/// Column list shared across queries. `author` is exposed as `author_type`.
const COLUMNS: &str = "id, version, name, description, author AS author_type, author_id, \
     status, tender_id, created_at, updated_at";

/// Provides versioned access to bids.
pub struct BidRepo;

impl BidRepo {
    /// Insert one version row. A duplicate `(id, version)` fails on
    /// `uq_bid_version`.
    pub async fn insert(
        pool: &PgPool,
        id: EntityId,
        input: &NewBidVersion,
    ) -> Result<BidRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO bid
                (id, version, name, description, author, author_id, status, tender_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BidRow>(&query)
            .bind(id)
            .bind(input.version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.author_type.as_str())
            .bind(input.author_id)
            .bind(input.status.as_str())
            .bind(input.tender_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_latest(pool: &PgPool, id: EntityId) -> Result<Option<BidRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bid WHERE id = $1 ORDER BY version DESC LIMIT 1");
        sqlx::query_as::<_, BidRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_version(
        pool: &PgPool,
        id: EntityId,
        version: Version,
    ) -> Result<Option<BidRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bid WHERE id = $1 AND version = $2");
        sqlx::query_as::<_, BidRow>(&query)
            .bind(id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    pub async fn latest_version(pool: &PgPool, id: EntityId) -> Result<Option<Version>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Version>>("SELECT MAX(version) FROM bid WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Set the status of whichever row is the max version at execution time.
    pub async fn update_latest_status(
        pool: &PgPool,
        id: EntityId,
        status: &str,
    ) -> Result<Option<BidRow>, sqlx::Error> {
        let query = format!(
            "UPDATE bid
             SET status = $2, updated_at = NOW()
             WHERE id = $1
               AND version = (SELECT MAX(version) FROM bid WHERE id = $1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BidRow>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
