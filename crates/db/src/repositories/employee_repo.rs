//! Repositories for `employee`, `organization`, and the
//! `organization_responsible` mapping.

use sqlx::PgPool;
use tenderflow_core::types::{ActorId, OrganizationId};

use crate::models::employee::{CreateEmployee, EmployeeRow};
use crate::models::organization::{CreateOrganization, OrganizationRow};

const EMPLOYEE_COLUMNS: &str = "id, username, first_name, last_name, created_at, updated_at";

const ORGANIZATION_COLUMNS: &str =
    "id, name, description, type AS organization_type, created_at, updated_at";

/// Read access to employees and their responsibilities.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<EmployeeRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO employee (username, first_name, last_name)
             VALUES ($1, $2, $3)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<EmployeeRow>, sqlx::Error> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE username = $1");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: ActorId) -> Result<Option<EmployeeRow>, sqlx::Error> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = $1");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn is_responsible(
        pool: &PgPool,
        organization_id: OrganizationId,
        user_id: ActorId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM organization_responsible
                 WHERE organization_id = $1 AND user_id = $2
             )",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub async fn has_any_responsibility(pool: &PgPool, user_id: ActorId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM organization_responsible WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// The organization an employee stands in for. When an employee is
    /// responsible for several, the lowest organization id wins so the
    /// answer is stable.
    pub async fn organization_of(
        pool: &PgPool,
        user_id: ActorId,
    ) -> Result<Option<OrganizationId>, sqlx::Error> {
        sqlx::query_scalar::<_, OrganizationId>(
            "SELECT organization_id FROM organization_responsible
             WHERE user_id = $1
             ORDER BY organization_id
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}

/// Write access to organizations and responsibility assignments.
pub struct OrganizationRepo;

impl OrganizationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<OrganizationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO organization (name, description, type)
             VALUES ($1, $2, $3)
             RETURNING {ORGANIZATION_COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.organization_type.map(|t| t.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: OrganizationId,
    ) -> Result<Option<OrganizationRow>, sqlx::Error> {
        let query = format!("SELECT {ORGANIZATION_COLUMNS} FROM organization WHERE id = $1");
        sqlx::query_as::<_, OrganizationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Make `user_id` responsible for `organization_id`. Idempotent.
    pub async fn add_responsible(
        pool: &PgPool,
        organization_id: OrganizationId,
        user_id: ActorId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO organization_responsible (organization_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (organization_id, user_id) DO NOTHING",
        )
        .bind(organization_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
