//! Identity directory port: employees and organization responsibility.

use std::future::Future;

use crate::entity::Employee;
use crate::error::StoreError;
use crate::types::{ActorId, OrganizationId};

/// Resolves employees and the `organization_responsible` relation.
///
/// A missing employee or mapping is `Ok(None)` / `Ok(false)`; `Err` is
/// reserved for lookup failures.
pub trait ActorDirectory: Send + Sync {
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<Employee>, StoreError>> + Send;

    fn get_by_id(
        &self,
        id: ActorId,
    ) -> impl Future<Output = Result<Option<Employee>, StoreError>> + Send;

    /// Whether `actor` is responsible for `organization`.
    fn is_responsible(
        &self,
        organization: OrganizationId,
        actor: ActorId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether `actor` is responsible for any organization at all.
    fn has_any_responsibility(
        &self,
        actor: ActorId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// The organization `actor` stands in for, if any.
    fn organization_of(
        &self,
        actor: ActorId,
    ) -> impl Future<Output = Result<Option<OrganizationId>, StoreError>> + Send;
}
