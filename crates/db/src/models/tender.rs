//! Tender version row.

use sqlx::FromRow;
use tenderflow_core::entity::Tender;
use tenderflow_core::types::{EntityId, OrganizationId, Timestamp, Version};

use crate::models::{parse_column, RowDecodeError};

/// A row from the `tender` table. `service_type` is the `type` column.
#[derive(Debug, Clone, FromRow)]
pub struct TenderRow {
    pub id: EntityId,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: OrganizationId,
    pub creator_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TenderRow> for Tender {
    type Error = RowDecodeError;

    fn try_from(row: TenderRow) -> Result<Self, Self::Error> {
        Ok(Tender {
            service_type: parse_column("tender", "type", &row.service_type)?,
            status: parse_column("tender", "status", &row.status)?,
            id: row.id,
            name: row.name,
            description: row.description,
            organization_id: row.organization_id,
            version: row.version,
            creator_username: row.creator_username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
