//! Request and response bodies, and query-string shapes.
//!
//! JSON bodies use camelCase; query parameters keep their snake_case names.

use serde::{Deserialize, Serialize};
use tenderflow_core::bid::{CreateBid, EditBid};
use tenderflow_core::entity::{
    Bid, Tender, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_USERNAME_LEN,
};
use tenderflow_core::pagination::Pagination;
use tenderflow_core::status::{AuthorType, BidStatus, Decision, ServiceType, TenderStatus};
use tenderflow_core::tender::{CreateTender, EditTender};
use tenderflow_core::types::{ActorId, EntityId, OrganizationId, Timestamp, Version};
use validator::Validate;

use crate::error::AppError;

// `validator` length bounds are `u64`; the core limits are `usize`.
const MAX_NAME_LEN_U64: u64 = MAX_NAME_LEN as u64;
const MAX_DESCRIPTION_LEN_U64: u64 = MAX_DESCRIPTION_LEN as u64;
const MAX_USERNAME_LEN_U64: u64 = MAX_USERNAME_LEN as u64;

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UsernameQuery {
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MyTendersQuery {
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub username: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MyTendersQuery {
    pub fn page(&self) -> Result<Pagination, AppError> {
        Ok(Pagination::new(self.limit, self.offset)?)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TenderStatusQuery {
    pub status: TenderStatus,
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BidStatusQuery {
    pub status: BidStatus,
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DecisionQuery {
    pub decision: Decision,
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub username: String,
}

/// Filters for the public tender listing.
///
/// `service_type` may repeat and each occurrence may hold a comma-separated
/// list, so this is parsed from raw key/value pairs.
#[derive(Debug, Default)]
pub struct PublishedTendersQuery {
    pub service_types: Vec<ServiceType>,
    pub page: Pagination,
}

impl PublishedTendersQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut service_types = Vec::new();
        let mut limit = None;
        let mut offset = None;

        for (key, value) in pairs {
            match key.as_str() {
                "service_type" => {
                    for raw in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        let parsed: ServiceType = raw.parse()?;
                        if !service_types.contains(&parsed) {
                            service_types.push(parsed);
                        }
                    }
                }
                "limit" => limit = Some(parse_number("limit", &value)?),
                "offset" => offset = Some(parse_number("offset", &value)?),
                _ => {}
            }
        }

        Ok(Self {
            service_types,
            page: Pagination::new(limit, offset)?,
        })
    }
}

fn parse_number(name: &str, value: &str) -> Result<i64, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be an integer, got '{value}'")))
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN_U64))]
    pub name: String,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN_U64))]
    pub description: String,
    pub service_type: ServiceType,
    pub organization_id: OrganizationId,
    #[validate(length(min = 1, max = MAX_USERNAME_LEN_U64))]
    pub creator_username: String,
}

impl From<CreateTenderRequest> for CreateTender {
    fn from(req: CreateTenderRequest) -> Self {
        CreateTender {
            name: req.name,
            description: req.description,
            service_type: req.service_type,
            organization_id: req.organization_id,
            creator_username: req.creator_username,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN_U64))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN_U64))]
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl From<EditTenderRequest> for EditTender {
    fn from(req: EditTenderRequest) -> Self {
        EditTender {
            name: req.name,
            description: req.description,
            service_type: req.service_type,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN_U64))]
    pub name: String,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN_U64))]
    pub description: String,
    pub tender_id: EntityId,
    pub author_type: AuthorType,
    pub author_id: ActorId,
}

impl From<CreateBidRequest> for CreateBid {
    fn from(req: CreateBidRequest) -> Self {
        CreateBid {
            name: req.name,
            description: req.description,
            tender_id: req.tender_id,
            author_type: req.author_type,
            author_id: req.author_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditBidRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN_U64))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN_U64))]
    pub description: Option<String>,
}

impl From<EditBidRequest> for EditBid {
    fn from(req: EditBidRequest) -> Self {
        EditBid {
            name: req.name,
            description: req.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub status: TenderStatus,
    pub service_type: ServiceType,
    pub version: Version,
    pub created_at: Timestamp,
}

impl From<Tender> for TenderResponse {
    fn from(t: Tender) -> Self {
        TenderResponse {
            id: t.id,
            name: t.name,
            description: t.description,
            status: t.status,
            service_type: t.service_type,
            version: t.version,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: EntityId,
    pub name: String,
    pub status: BidStatus,
    pub author_type: AuthorType,
    pub author_id: ActorId,
    pub version: Version,
    pub created_at: Timestamp,
}

impl From<Bid> for BidResponse {
    fn from(b: Bid) -> Self {
        BidResponse {
            id: b.id,
            name: b.name,
            status: b.status,
            author_type: b.author_type,
            author_id: b.author_id,
            version: b.version,
            created_at: b.created_at,
        }
    }
}
