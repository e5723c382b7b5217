//! [`PgStore`]: the PostgreSQL adapter for the core directory and store ports.

use tenderflow_core::directory::ActorDirectory;
use tenderflow_core::entity::{Bid, Employee, NewBidVersion, NewTenderVersion, Tender};
use tenderflow_core::error::StoreError;
use tenderflow_core::pagination::Pagination;
use tenderflow_core::status::{BidStatus, ServiceType, TenderStatus};
use tenderflow_core::store::{BidStore, TenderStore};
use tenderflow_core::types::{ActorId, EntityId, OrganizationId, Version, VersionSelector};
use uuid::Uuid;

use crate::models::RowDecodeError;
use crate::repositories::{BidRepo, EmployeeRepo, TenderRepo};
use crate::DbPool;

/// Cheaply cloneable; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify an insert failure. A unique violation on a `uq_` constraint means a
/// concurrent writer already holds `(id, version)`.
fn insert_error(err: sqlx::Error, id: EntityId, version: Version) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let is_unique = db_err.code().as_deref() == Some(UNIQUE_VIOLATION);
        let is_version_key = db_err
            .constraint()
            .is_some_and(|constraint| constraint.starts_with("uq_"));
        if is_unique && is_version_key {
            return StoreError::Conflict { id, version };
        }
    }
    unavailable(err)
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl From<RowDecodeError> for StoreError {
    fn from(err: RowDecodeError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = RowDecodeError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(StoreError::from))
        .collect()
}

fn service_type_names(service_types: &[ServiceType]) -> Vec<String> {
    service_types.iter().map(|t| t.as_str().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

impl ActorDirectory for PgStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<Employee>, StoreError> {
        let row = EmployeeRepo::find_by_username(&self.pool, username)
            .await
            .map_err(unavailable)?;
        Ok(row.map(Employee::from))
    }

    async fn get_by_id(&self, id: ActorId) -> Result<Option<Employee>, StoreError> {
        let row = EmployeeRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?;
        Ok(row.map(Employee::from))
    }

    async fn is_responsible(
        &self,
        organization: OrganizationId,
        actor: ActorId,
    ) -> Result<bool, StoreError> {
        EmployeeRepo::is_responsible(&self.pool, organization, actor)
            .await
            .map_err(unavailable)
    }

    async fn has_any_responsibility(&self, actor: ActorId) -> Result<bool, StoreError> {
        EmployeeRepo::has_any_responsibility(&self.pool, actor)
            .await
            .map_err(unavailable)
    }

    async fn organization_of(&self, actor: ActorId) -> Result<Option<OrganizationId>, StoreError> {
        EmployeeRepo::organization_of(&self.pool, actor)
            .await
            .map_err(unavailable)
    }
}

// ---------------------------------------------------------------------------
// Tenders
// ---------------------------------------------------------------------------

impl TenderStore for PgStore {
    async fn get(
        &self,
        id: EntityId,
        version: VersionSelector,
    ) -> Result<Option<Tender>, StoreError> {
        let row = match version {
            VersionSelector::Latest => TenderRepo::find_latest(&self.pool, id).await,
            VersionSelector::Exact(v) => TenderRepo::find_version(&self.pool, id, v).await,
        }
        .map_err(unavailable)?;
        Ok(row.map(Tender::try_from).transpose()?)
    }

    async fn latest_version_number(&self, id: EntityId) -> Result<Option<Version>, StoreError> {
        TenderRepo::latest_version(&self.pool, id)
            .await
            .map_err(unavailable)
    }

    async fn insert_version(&self, row: NewTenderVersion) -> Result<Tender, StoreError> {
        let id = row.id.unwrap_or_else(Uuid::new_v4);
        let inserted = TenderRepo::insert(&self.pool, id, &row)
            .await
            .map_err(|e| insert_error(e, id, row.version))?;
        Ok(Tender::try_from(inserted)?)
    }

    async fn update_status_of_latest(
        &self,
        id: EntityId,
        status: TenderStatus,
    ) -> Result<Option<Tender>, StoreError> {
        let row = TenderRepo::update_latest_status(&self.pool, id, status.as_str())
            .await
            .map_err(unavailable)?;
        Ok(row.map(Tender::try_from).transpose()?)
    }

    async fn list_by_creator(
        &self,
        username: &str,
        page: Pagination,
    ) -> Result<Vec<Tender>, StoreError> {
        let rows = TenderRepo::list_by_creator(&self.pool, username, page.limit, page.offset)
            .await
            .map_err(unavailable)?;
        decode_all(rows)
    }

    async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: Pagination,
    ) -> Result<Vec<Tender>, StoreError> {
        let names = service_type_names(service_types);
        let rows = TenderRepo::list_published(&self.pool, &names, page.limit, page.offset)
            .await
            .map_err(unavailable)?;
        decode_all(rows)
    }
}

// ---------------------------------------------------------------------------
// Bids
// ---------------------------------------------------------------------------

impl BidStore for PgStore {
    async fn get(&self, id: EntityId, version: VersionSelector) -> Result<Option<Bid>, StoreError> {
        let row = match version {
            VersionSelector::Latest => BidRepo::find_latest(&self.pool, id).await,
            VersionSelector::Exact(v) => BidRepo::find_version(&self.pool, id, v).await,
        }
        .map_err(unavailable)?;
        Ok(row.map(Bid::try_from).transpose()?)
    }

    async fn latest_version_number(&self, id: EntityId) -> Result<Option<Version>, StoreError> {
        BidRepo::latest_version(&self.pool, id)
            .await
            .map_err(unavailable)
    }

    async fn insert_version(&self, row: NewBidVersion) -> Result<Bid, StoreError> {
        let id = row.id.unwrap_or_else(Uuid::new_v4);
        let inserted = BidRepo::insert(&self.pool, id, &row)
            .await
            .map_err(|e| insert_error(e, id, row.version))?;
        Ok(Bid::try_from(inserted)?)
    }

    async fn update_status_of_latest(
        &self,
        id: EntityId,
        status: BidStatus,
    ) -> Result<Option<Bid>, StoreError> {
        let row = BidRepo::update_latest_status(&self.pool, id, status.as_str())
            .await
            .map_err(unavailable)?;
        Ok(row.map(Bid::try_from).transpose()?)
    }
}
