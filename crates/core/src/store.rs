//! Versioned store ports for tenders and bids.
//!
//! Implementations must keep `(id, version)` unique and report a duplicate
//! insert as [`StoreError::Conflict`]. Status updates touch only the row that
//! is still the max version for its id, in a single atomic step.

use std::future::Future;

use crate::entity::{Bid, NewBidVersion, NewTenderVersion, Tender};
use crate::error::StoreError;
use crate::pagination::Pagination;
use crate::status::{BidStatus, ServiceType, TenderStatus};
use crate::types::{EntityId, Version, VersionSelector};

pub trait TenderStore: Send + Sync {
    fn get(
        &self,
        id: EntityId,
        version: VersionSelector,
    ) -> impl Future<Output = Result<Option<Tender>, StoreError>> + Send;

    fn latest_version_number(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Version>, StoreError>> + Send;

    fn insert_version(
        &self,
        row: NewTenderVersion,
    ) -> impl Future<Output = Result<Tender, StoreError>> + Send;

    /// Set the status of the latest row in place. `Ok(None)` if `id` has no rows.
    fn update_status_of_latest(
        &self,
        id: EntityId,
        status: TenderStatus,
    ) -> impl Future<Output = Result<Option<Tender>, StoreError>> + Send;

    /// Latest rows created by `username`, ordered by name.
    fn list_by_creator(
        &self,
        username: &str,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Tender>, StoreError>> + Send;

    /// Latest rows whose status is `Published`, ordered by name. An empty
    /// `service_types` slice means no filter.
    fn list_published(
        &self,
        service_types: &[ServiceType],
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Tender>, StoreError>> + Send;
}

pub trait BidStore: Send + Sync {
    fn get(
        &self,
        id: EntityId,
        version: VersionSelector,
    ) -> impl Future<Output = Result<Option<Bid>, StoreError>> + Send;

    fn latest_version_number(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Version>, StoreError>> + Send;

    fn insert_version(
        &self,
        row: NewBidVersion,
    ) -> impl Future<Output = Result<Bid, StoreError>> + Send;

    fn update_status_of_latest(
        &self,
        id: EntityId,
        status: BidStatus,
    ) -> impl Future<Output = Result<Option<Bid>, StoreError>> + Send;
}
