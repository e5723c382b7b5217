//! Authorization resolver: decides whether an actor may mutate an entity.
//!
//! Ownership is resolved once per entity into an [`Owner`]; the check then
//! branches on the variant. Nothing here mutates state.

use crate::directory::ActorDirectory;
use crate::entity::{Bid, Employee, Tender};
use crate::error::CoreError;
use crate::status::AuthorType;
use crate::types::{ActorId, OrganizationId};

/// Who owns a tender or bid for authorization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Only this employee may mutate the entity.
    Individual(ActorId),
    /// Any employee responsible for this organization may mutate the entity.
    Organization(OrganizationId),
}

impl Owner {
    pub fn of_tender(tender: &Tender) -> Self {
        Owner::Organization(tender.organization_id)
    }
}

#[derive(Debug, Clone)]
pub struct Authorizer<D> {
    directory: D,
}

impl<D: ActorDirectory> Authorizer<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Look up the acting employee by username.
    pub async fn resolve_actor(&self, username: &str) -> Result<Employee, CoreError> {
        match self.directory.get_by_username(username).await {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => Err(CoreError::UnknownActor(username.to_string())),
            Err(err) => Err(err.into_core("Authorizer.resolve_actor - directory.get_by_username")),
        }
    }

    /// Look up an employee by id.
    pub async fn resolve_actor_by_id(&self, id: ActorId) -> Result<Employee, CoreError> {
        match self.directory.get_by_id(id).await {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => Err(CoreError::UnknownActor(id.to_string())),
            Err(err) => Err(err.into_core("Authorizer.resolve_actor_by_id - directory.get_by_id")),
        }
    }

    /// Whether `username` may mutate entities owned by `organization`.
    pub async fn is_authorized_mutator(
        &self,
        username: &str,
        organization: OrganizationId,
    ) -> Result<bool, CoreError> {
        let actor = self.resolve_actor(username).await?;
        self.may_mutate(&actor, &Owner::Organization(organization))
            .await
    }

    /// Resolve the owner of a bid.
    ///
    /// `None` means the bid is organization-authored but its author maps to no
    /// organization, so nobody holds responsibility for it.
    pub async fn owner_of_bid(&self, bid: &Bid) -> Result<Option<Owner>, CoreError> {
        match bid.author_type {
            AuthorType::User => Ok(Some(Owner::Individual(bid.author_id))),
            AuthorType::Organization => self
                .directory
                .organization_of(bid.author_id)
                .await
                .map(|org| org.map(Owner::Organization))
                .map_err(|err| err.into_core("Authorizer.owner_of_bid - directory.organization_of")),
        }
    }

    pub async fn may_mutate(&self, actor: &Employee, owner: &Owner) -> Result<bool, CoreError> {
        match owner {
            Owner::Individual(author_id) => Ok(*author_id == actor.id),
            Owner::Organization(org) => self
                .directory
                .is_responsible(*org, actor.id)
                .await
                .map_err(|err| err.into_core("Authorizer.may_mutate - directory.is_responsible")),
        }
    }

    /// Like [`Self::may_mutate`] but turns a denial into `Forbidden`.
    pub async fn ensure_may_mutate(&self, actor: &Employee, owner: &Owner) -> Result<(), CoreError> {
        if self.may_mutate(actor, owner).await? {
            Ok(())
        } else {
            tracing::debug!(actor = %actor.username, ?owner, "Mutation denied");
            Err(CoreError::not_enough_rights())
        }
    }

    pub async fn ensure_may_mutate_bid(&self, actor: &Employee, bid: &Bid) -> Result<(), CoreError> {
        match self.owner_of_bid(bid).await? {
            Some(owner) => self.ensure_may_mutate(actor, &owner).await,
            None => {
                tracing::debug!(actor = %actor.username, bid_id = %bid.id, "Bid author has no organization");
                Err(CoreError::not_enough_rights())
            }
        }
    }
}
