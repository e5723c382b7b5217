#![allow(dead_code)]

use std::sync::Arc;

use tenderflow_core::bid::{BidWorkflow, CreateBid};
use tenderflow_core::entity::{Bid, Employee, Tender};
use tenderflow_core::memory::InMemoryStore;
use tenderflow_core::status::{AuthorType, BidStatus, ServiceType, TenderStatus};
use tenderflow_core::tender::{CreateTender, TenderWorkflow};
use tenderflow_core::types::OrganizationId;

pub type Tenders = TenderWorkflow<InMemoryStore, InMemoryStore>;
pub type Bids = BidWorkflow<InMemoryStore, InMemoryStore, InMemoryStore>;

/// Both engines wired to one shared in-memory store.
pub struct Fixture {
    pub store: InMemoryStore,
    pub tenders: Arc<Tenders>,
    pub bids: Bids,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let tenders = Arc::new(TenderWorkflow::new(store.clone(), store.clone()));
        let bids = BidWorkflow::new(store.clone(), Arc::clone(&tenders));
        Self {
            store,
            tenders,
            bids,
        }
    }

    /// Create an organization and a user responsible for it.
    pub async fn organization_with_user(&self, username: &str) -> (OrganizationId, Employee) {
        let org_id = self.store.add_organization();
        let user = self.store.add_employee(username).await;
        self.store.add_responsibility(org_id, user.id).await;
        (org_id, user)
    }

    pub async fn tender(&self, org: OrganizationId, username: &str, name: &str) -> Tender {
        self.tenders
            .create(new_tender(org, username, name))
            .await
            .unwrap()
    }

    pub async fn published_tender(&self, org: OrganizationId, username: &str, name: &str) -> Tender {
        let tender = self.tender(org, username, name).await;
        self.tenders
            .change_status(tender.id, TenderStatus::Published, username)
            .await
            .unwrap()
    }

    pub async fn published_bid(&self, tender: &Tender, author: &Employee, author_type: AuthorType) -> Bid {
        let bid = self
            .bids
            .create(new_bid(tender, author, author_type, "Offer"))
            .await
            .unwrap();
        self.bids
            .change_status(bid.id, BidStatus::Published, &author.username)
            .await
            .unwrap()
    }
}

pub fn new_tender(org: OrganizationId, username: &str, name: &str) -> CreateTender {
    CreateTender {
        name: name.to_string(),
        description: format!("{name} description"),
        service_type: ServiceType::Construction,
        organization_id: org,
        creator_username: username.to_string(),
    }
}

pub fn new_bid(tender: &Tender, author: &Employee, author_type: AuthorType, name: &str) -> CreateBid {
    CreateBid {
        name: name.to_string(),
        description: format!("{name} description"),
        tender_id: tender.id,
        author_type,
        author_id: author.id,
    }
}
