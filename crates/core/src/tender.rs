//! Tender workflow: create, list, status change, edit, and rollback over the
//! tender's version history.

use crate::authz::{Authorizer, Owner};
use crate::directory::ActorDirectory;
use crate::entity::{override_or_inherit, NewTenderVersion, Tender};
use crate::error::CoreError;
use crate::pagination::Pagination;
use crate::status::{ServiceType, TenderStatus};
use crate::store::TenderStore;
use crate::types::{EntityId, OrganizationId, Version, VersionSelector, INITIAL_VERSION};

#[derive(Debug, Clone)]
pub struct CreateTender {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub organization_id: OrganizationId,
    pub creator_username: String,
}

/// Field overrides for a new tender version. `None` (or a blank string)
/// inherits the current value.
/// The resulting version must differ from the current one.
#[derive(Debug, Clone, Default)]
pub struct EditTender {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl EditTender {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.service_type.is_none()
    }
}

pub struct TenderWorkflow<S, D> {
    store: S,
    authz: Authorizer<D>,
}

impl<S: TenderStore, D: ActorDirectory> TenderWorkflow<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store,
            authz: Authorizer::new(directory),
        }
    }

    pub fn authorizer(&self) -> &Authorizer<D> {
        &self.authz
    }

    pub async fn create(&self, input: CreateTender) -> Result<Tender, CoreError> {
        let actor = self.authz.resolve_actor(&input.creator_username).await?;
        self.authz
            .ensure_may_mutate(&actor, &Owner::Organization(input.organization_id))
            .await?;

        let row = NewTenderVersion {
            id: None,
            version: INITIAL_VERSION,
            name: input.name,
            description: input.description,
            service_type: input.service_type,
            status: TenderStatus::Created,
            organization_id: input.organization_id,
            creator_username: input.creator_username,
        };
        let tender = self
            .store
            .insert_version(row)
            .await
            .map_err(|e| e.into_core("TenderWorkflow.create - store.insert_version"))?;

        tracing::info!(
            tender_id = %tender.id,
            organization_id = %tender.organization_id,
            actor = %actor.username,
            "Tender created"
        );
        Ok(tender)
    }

    /// Public listing of published tenders. No authorization.
    pub async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: Pagination,
    ) -> Result<Vec<Tender>, CoreError> {
        self.store
            .list_published(service_types, page)
            .await
            .map_err(|e| e.into_core("TenderWorkflow.list_published - store.list_published"))
    }

    /// Tenders created by `username`. The user must exist.
    pub async fn list_mine(&self, username: &str, page: Pagination) -> Result<Vec<Tender>, CoreError> {
        self.authz.resolve_actor(username).await?;
        self.store
            .list_by_creator(username, page)
            .await
            .map_err(|e| e.into_core("TenderWorkflow.list_mine - store.list_by_creator"))
    }

    /// Set the status of the latest version in place; the version number is
    /// unchanged.
    pub async fn change_status(
        &self,
        id: EntityId,
        status: TenderStatus,
        username: &str,
    ) -> Result<Tender, CoreError> {
        let actor = self.authz.resolve_actor(username).await?;
        let tender = self.fetch_latest(id).await?;
        self.authz
            .ensure_may_mutate(&actor, &Owner::of_tender(&tender))
            .await?;

        let updated = self.set_status(id, status).await?;
        tracing::info!(
            tender_id = %id,
            version = updated.version,
            status = %status,
            actor = %actor.username,
            "Tender status changed"
        );
        Ok(updated)
    }

    /// Latest version of a tender, visible only to its organization.
    pub async fn get(&self, id: EntityId, username: &str) -> Result<Tender, CoreError> {
        let actor = self.authz.resolve_actor(username).await?;
        let tender = self.fetch_latest(id).await?;
        self.authz
            .ensure_may_mutate(&actor, &Owner::of_tender(&tender))
            .await?;
        Ok(tender)
    }

    pub async fn status(&self, id: EntityId, username: &str) -> Result<TenderStatus, CoreError> {
        self.get(id, username).await.map(|t| t.status)
    }

    /// Append a version built from the latest one plus `changes`.
    pub async fn edit(
        &self,
        id: EntityId,
        username: &str,
        changes: EditTender,
    ) -> Result<Tender, CoreError> {
        if changes.is_empty() {
            return Err(CoreError::Validation(
                "at least one of name, description, serviceType must be supplied".into(),
            ));
        }

        let actor = self.authz.resolve_actor(username).await?;
        let latest = self.fetch_latest(id).await?;
        self.authz
            .ensure_may_mutate(&actor, &Owner::of_tender(&latest))
            .await?;

        let mut row = NewTenderVersion::from_snapshot(&latest, latest.version + 1);
        row.name = override_or_inherit(changes.name.as_deref(), &latest.name);
        row.description = override_or_inherit(changes.description.as_deref(), &latest.description);
        row.service_type = changes.service_type.unwrap_or(latest.service_type);
        if row.name == latest.name
            && row.description == latest.description
            && row.service_type == latest.service_type
        {
            return Err(CoreError::Validation(
                "edit must change at least one of name, description, serviceType".into(),
            ));
        }

        let tender = self
            .store
            .insert_version(row)
            .await
            .map_err(|e| e.into_core("TenderWorkflow.edit - store.insert_version"))?;

        tracing::info!(tender_id = %id, version = tender.version, actor = %actor.username, "Tender edited");
        Ok(tender)
    }

    /// Append a copy of historical `version` as the new latest version.
    ///
    /// Authorization is checked against the historical row's organization.
    pub async fn rollback(
        &self,
        id: EntityId,
        version: Version,
        username: &str,
    ) -> Result<Tender, CoreError> {
        if version < INITIAL_VERSION {
            return Err(CoreError::Validation(format!(
                "version must be positive, got {version}"
            )));
        }

        let actor = self.authz.resolve_actor(username).await?;
        let template = self
            .store
            .get(id, VersionSelector::Exact(version))
            .await
            .map_err(|e| e.into_core("TenderWorkflow.rollback - store.get"))?
            .ok_or_else(|| CoreError::tender_not_found(id))?;
        self.authz
            .ensure_may_mutate(&actor, &Owner::of_tender(&template))
            .await?;

        let latest_version = self
            .store
            .latest_version_number(id)
            .await
            .map_err(|e| e.into_core("TenderWorkflow.rollback - store.latest_version_number"))?
            .ok_or_else(|| CoreError::tender_not_found(id))?;

        let tender = self
            .store
            .insert_version(NewTenderVersion::from_snapshot(&template, latest_version + 1))
            .await
            .map_err(|e| e.into_core("TenderWorkflow.rollback - store.insert_version"))?;

        tracing::info!(
            tender_id = %id,
            from_version = version,
            version = tender.version,
            actor = %actor.username,
            "Tender rolled back"
        );
        Ok(tender)
    }

    /// Latest version of a tender, without authorization.
    pub(crate) async fn fetch_latest(&self, id: EntityId) -> Result<Tender, CoreError> {
        self.store
            .get(id, VersionSelector::Latest)
            .await
            .map_err(|e| e.into_core("TenderWorkflow - store.get"))?
            .ok_or_else(|| CoreError::tender_not_found(id))
    }

    /// Close a tender after one of its bids was approved. The caller has
    /// already authorized the decision.
    pub(crate) async fn close(&self, id: EntityId) -> Result<Tender, CoreError> {
        let closed = self.set_status(id, TenderStatus::Closed).await?;
        tracing::info!(tender_id = %id, version = closed.version, "Tender closed by approved bid");
        Ok(closed)
    }

    async fn set_status(&self, id: EntityId, status: TenderStatus) -> Result<Tender, CoreError> {
        self.store
            .update_status_of_latest(id, status)
            .await
            .map_err(|e| e.into_core("TenderWorkflow - store.update_status_of_latest"))?
            .ok_or_else(|| CoreError::tender_not_found(id))
    }
}
