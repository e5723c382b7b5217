//! Bid version row.

use sqlx::FromRow;
use tenderflow_core::entity::Bid;
use tenderflow_core::types::{ActorId, EntityId, Timestamp, Version};

use crate::models::{parse_column, RowDecodeError};

/// A row from the `bid` table. `author_type` is the `author` column.
#[derive(Debug, Clone, FromRow)]
pub struct BidRow {
    pub id: EntityId,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub author_type: String,
    pub author_id: ActorId,
    pub status: String,
    pub tender_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<BidRow> for Bid {
    type Error = RowDecodeError;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        Ok(Bid {
            author_type: parse_column("bid", "author", &row.author_type)?,
            status: parse_column("bid", "status", &row.status)?,
            id: row.id,
            name: row.name,
            description: row.description,
            author_id: row.author_id,
            version: row.version,
            tender_id: row.tender_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
