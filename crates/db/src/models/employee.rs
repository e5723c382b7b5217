//! Employee row and create DTO.

use sqlx::FromRow;
use tenderflow_core::entity::Employee;
use tenderflow_core::types::{ActorId, Timestamp};

/// A row from the `employee` table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: ActorId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
