//! Bid workflow: create, decide, status change, get, edit, and rollback.
//!
//! A bid is only actionable while its parent tender's latest version is
//! `Published`. A tender in any other state is reported as not found so its
//! existence is not revealed.

use std::sync::Arc;

use crate::authz::Owner;
use crate::directory::ActorDirectory;
use crate::entity::{override_or_inherit, Bid, NewBidVersion, Tender};
use crate::error::CoreError;
use crate::status::{AuthorType, BidStatus, Decision, TenderStatus};
use crate::store::{BidStore, TenderStore};
use crate::tender::TenderWorkflow;
use crate::types::{ActorId, EntityId, Version, VersionSelector, INITIAL_VERSION};

#[derive(Debug, Clone)]
pub struct CreateBid {
    pub name: String,
    pub description: String,
    pub tender_id: EntityId,
    pub author_type: AuthorType,
    pub author_id: ActorId,
}

/// Field overrides for a new bid version. `None` (or a blank string) inherits
/// the current value.
/// The resulting version must differ from the current one.
#[derive(Debug, Clone, Default)]
pub struct EditBid {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl EditBid {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

pub struct BidWorkflow<B, S, D> {
    bids: B,
    tenders: Arc<TenderWorkflow<S, D>>,
}

impl<B, S, D> BidWorkflow<B, S, D>
where
    B: BidStore,
    S: TenderStore,
    D: ActorDirectory,
{
    pub fn new(bids: B, tenders: Arc<TenderWorkflow<S, D>>) -> Self {
        Self { bids, tenders }
    }

    pub async fn create(&self, input: CreateBid) -> Result<Bid, CoreError> {
        let authz = self.tenders.authorizer();
        let author = authz.resolve_actor_by_id(input.author_id).await?;
        self.published_tender(input.tender_id).await?;

        if input.author_type == AuthorType::Organization {
            let responsible = authz
                .directory()
                .has_any_responsibility(author.id)
                .await
                .map_err(|e| e.into_core("BidWorkflow.create - directory.has_any_responsibility"))?;
            if !responsible {
                return Err(CoreError::not_enough_rights());
            }
        }

        let row = NewBidVersion {
            id: None,
            version: INITIAL_VERSION,
            name: input.name,
            description: input.description,
            author_type: input.author_type,
            author_id: input.author_id,
            status: BidStatus::Created,
            tender_id: input.tender_id,
        };
        let bid = self
            .bids
            .insert_version(row)
            .await
            .map_err(|e| e.into_core("BidWorkflow.create - store.insert_version"))?;

        tracing::info!(
            bid_id = %bid.id,
            tender_id = %bid.tender_id,
            author_type = %bid.author_type,
            author_id = %bid.author_id,
            "Bid created"
        );
        Ok(bid)
    }

    /// Record the tender owner's decision on a published bid.
    ///
    /// `Approved` closes the parent tender; `Rejected` has no effect. The bid
    /// itself is never modified and is returned as read.
    pub async fn submit_decision(
        &self,
        bid_id: EntityId,
        username: &str,
        decision: Decision,
    ) -> Result<Bid, CoreError> {
        let authz = self.tenders.authorizer();
        let actor = authz.resolve_actor(username).await?;

        let bid = self.fetch(bid_id, VersionSelector::Latest).await?;
        if bid.status != BidStatus::Published {
            return Err(CoreError::bid_not_found(bid_id));
        }
        let tender = self.published_tender(bid.tender_id).await?;

        authz
            .ensure_may_mutate(&actor, &Owner::of_tender(&tender))
            .await?;

        match decision {
            Decision::Approved => {
                self.tenders.close(tender.id).await?;
            }
            Decision::Rejected => {}
        }

        tracing::info!(
            bid_id = %bid_id,
            tender_id = %tender.id,
            decision = %decision,
            actor = %actor.username,
            "Bid decision submitted"
        );
        Ok(bid)
    }

    pub async fn change_status(
        &self,
        bid_id: EntityId,
        status: BidStatus,
        username: &str,
    ) -> Result<Bid, CoreError> {
        let authz = self.tenders.authorizer();
        let actor = authz.resolve_actor(username).await?;
        let bid = self.fetch(bid_id, VersionSelector::Latest).await?;
        authz.ensure_may_mutate_bid(&actor, &bid).await?;

        let updated = self
            .bids
            .update_status_of_latest(bid_id, status)
            .await
            .map_err(|e| e.into_core("BidWorkflow.change_status - store.update_status_of_latest"))?
            .ok_or_else(|| CoreError::bid_not_found(bid_id))?;

        tracing::info!(
            bid_id = %bid_id,
            version = updated.version,
            status = %status,
            actor = %actor.username,
            "Bid status changed"
        );
        Ok(updated)
    }

    /// Latest version of a bid, visible only to its owner.
    pub async fn get(&self, bid_id: EntityId, username: &str) -> Result<Bid, CoreError> {
        let authz = self.tenders.authorizer();
        let actor = authz.resolve_actor(username).await?;
        let bid = self.fetch(bid_id, VersionSelector::Latest).await?;
        authz.ensure_may_mutate_bid(&actor, &bid).await?;
        Ok(bid)
    }

    pub async fn status(&self, bid_id: EntityId, username: &str) -> Result<BidStatus, CoreError> {
        self.get(bid_id, username).await.map(|b| b.status)
    }

    pub async fn edit(
        &self,
        bid_id: EntityId,
        username: &str,
        changes: EditBid,
    ) -> Result<Bid, CoreError> {
        if changes.is_empty() {
            return Err(CoreError::Validation(
                "at least one of name, description must be supplied".into(),
            ));
        }

        let authz = self.tenders.authorizer();
        let actor = authz.resolve_actor(username).await?;
        let latest = self.fetch(bid_id, VersionSelector::Latest).await?;
        authz.ensure_may_mutate_bid(&actor, &latest).await?;

        let mut row = NewBidVersion::from_snapshot(&latest, latest.version + 1);
        row.name = override_or_inherit(changes.name.as_deref(), &latest.name);
        row.description = override_or_inherit(changes.description.as_deref(), &latest.description);
        if row.name == latest.name && row.description == latest.description {
            return Err(CoreError::Validation(
                "edit must change at least one of name, description".into(),
            ));
        }

        let bid = self
            .bids
            .insert_version(row)
            .await
            .map_err(|e| e.into_core("BidWorkflow.edit - store.insert_version"))?;

        tracing::info!(bid_id = %bid_id, version = bid.version, actor = %actor.username, "Bid edited");
        Ok(bid)
    }

    /// Append a copy of historical `version` as the new latest version.
    ///
    /// Authorization is checked against the historical row's owner.
    pub async fn rollback(
        &self,
        bid_id: EntityId,
        version: Version,
        username: &str,
    ) -> Result<Bid, CoreError> {
        if version < INITIAL_VERSION {
            return Err(CoreError::Validation(format!(
                "version must be positive, got {version}"
            )));
        }

        let authz = self.tenders.authorizer();
        let actor = authz.resolve_actor(username).await?;
        let template = self.fetch(bid_id, VersionSelector::Exact(version)).await?;
        authz.ensure_may_mutate_bid(&actor, &template).await?;

        let latest_version = self
            .bids
            .latest_version_number(bid_id)
            .await
            .map_err(|e| e.into_core("BidWorkflow.rollback - store.latest_version_number"))?
            .ok_or_else(|| CoreError::bid_not_found(bid_id))?;

        let bid = self
            .bids
            .insert_version(NewBidVersion::from_snapshot(&template, latest_version + 1))
            .await
            .map_err(|e| e.into_core("BidWorkflow.rollback - store.insert_version"))?;

        tracing::info!(
            bid_id = %bid_id,
            from_version = version,
            version = bid.version,
            actor = %actor.username,
            "Bid rolled back"
        );
        Ok(bid)
    }

    async fn fetch(&self, bid_id: EntityId, version: VersionSelector) -> Result<Bid, CoreError> {
        self.bids
            .get(bid_id, version)
            .await
            .map_err(|e| e.into_core("BidWorkflow - store.get"))?
            .ok_or_else(|| CoreError::bid_not_found(bid_id))
    }

    async fn published_tender(&self, tender_id: EntityId) -> Result<Tender, CoreError> {
        let tender = self.tenders.fetch_latest(tender_id).await?;
        if tender.status != TenderStatus::Published {
            return Err(CoreError::tender_not_found(tender_id));
        }
        Ok(tender)
    }
}
