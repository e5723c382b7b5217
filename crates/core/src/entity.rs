//! Version rows and identity records.

use crate::status::{AuthorType, BidStatus, OrganizationType, ServiceType, TenderStatus};
use crate::types::{ActorId, EntityId, OrganizationId, Timestamp, Version};

/// Longest accepted tender or bid name.
pub const MAX_NAME_LEN: usize = 100;

/// Longest accepted tender or bid description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 50;

/// One immutable version of a tender. Only `status` and `updated_at` change
/// after insertion, and only on the latest row.
#[derive(Debug, Clone, PartialEq)]
pub struct Tender {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub organization_id: OrganizationId,
    pub version: Version,
    pub creator_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A full tender row to be appended to history.
///
/// `id = None` with `version = 1` creates a new tender; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenderVersion {
    pub id: Option<EntityId>,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub organization_id: OrganizationId,
    pub creator_username: String,
}

impl NewTenderVersion {
    /// Copy every field of `template` into a row for `id` at `version`.
    pub fn from_snapshot(template: &Tender, version: Version) -> Self {
        Self {
            id: Some(template.id),
            version,
            name: template.name.clone(),
            description: template.description.clone(),
            service_type: template.service_type,
            status: template.status,
            organization_id: template.organization_id,
            creator_username: template.creator_username.clone(),
        }
    }
}

/// One immutable version of a bid.
#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub author_type: AuthorType,
    pub author_id: ActorId,
    pub status: BidStatus,
    pub version: Version,
    pub tender_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A full bid row to be appended to history.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBidVersion {
    pub id: Option<EntityId>,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub author_type: AuthorType,
    pub author_id: ActorId,
    pub status: BidStatus,
    pub tender_id: EntityId,
}

impl NewBidVersion {
    pub fn from_snapshot(template: &Bid, version: Version) -> Self {
        Self {
            id: Some(template.id),
            version,
            name: template.name.clone(),
            description: template.description.clone(),
            author_type: template.author_type,
            author_id: template.author_id,
            status: template.status,
            tender_id: template.tender_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: ActorId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub organization_type: Option<OrganizationType>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Pick `candidate` unless it is absent or blank, otherwise keep `current`.
pub(crate) fn override_or_inherit(candidate: Option<&str>, current: &str) -> String {
    match candidate {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}
