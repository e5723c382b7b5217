//! Organization row and create DTO.

use sqlx::FromRow;
use tenderflow_core::entity::Organization;
use tenderflow_core::status::OrganizationType;
use tenderflow_core::types::{OrganizationId, Timestamp};

use crate::models::{parse_column, RowDecodeError};

/// A row from the `organization` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationRow {
    pub id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub organization_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = RowDecodeError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        let organization_type = row
            .organization_type
            .as_deref()
            .map(|t| parse_column("organization", "type", t))
            .transpose()?;
        Ok(Organization {
            id: row.id,
            name: row.name,
            description: row.description,
            organization_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
    pub description: Option<String>,
    pub organization_type: Option<OrganizationType>,
}
