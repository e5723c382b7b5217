//! In-memory implementation of the directory and versioned-store ports.
//!
//! Version rows live in an append-only arena per entity type. An index maps
//! each entity id to its versions (ordered) and to the arena slot of the max
//! version, which is recomputed on every insert. Historical rows are never
//! touched; the status update reaches only the latest slot, under the write
//! lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::directory::ActorDirectory;
use crate::entity::{Bid, Employee, NewBidVersion, NewTenderVersion, Tender};
use crate::error::StoreError;
use crate::pagination::Pagination;
use crate::status::{BidStatus, ServiceType, TenderStatus};
use crate::store::{BidStore, TenderStore};
use crate::types::{ActorId, EntityId, OrganizationId, Version, VersionSelector};

trait Versioned {
    fn entity_id(&self) -> EntityId;
    fn version(&self) -> Version;
}

impl Versioned for Tender {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn version(&self) -> Version {
        self.version
    }
}

impl Versioned for Bid {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn version(&self) -> Version {
        self.version
    }
}

struct Chain {
    slots: BTreeMap<Version, usize>,
    latest: usize,
}

struct VersionTable<T> {
    arena: Vec<T>,
    index: HashMap<EntityId, Chain>,
}

impl<T> Default for VersionTable<T> {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Versioned + Clone> VersionTable<T> {
    fn get(&self, id: EntityId, selector: VersionSelector) -> Option<&T> {
        let chain = self.index.get(&id)?;
        let slot = match selector {
            VersionSelector::Latest => chain.latest,
            VersionSelector::Exact(v) => *chain.slots.get(&v)?,
        };
        self.arena.get(slot)
    }

    fn latest_version(&self, id: EntityId) -> Option<Version> {
        self.get(id, VersionSelector::Latest).map(Versioned::version)
    }

    fn insert(&mut self, row: T) -> Result<T, StoreError> {
        let id = row.entity_id();
        let version = row.version();
        if let Some(chain) = self.index.get(&id) {
            if chain.slots.contains_key(&version) {
                return Err(StoreError::Conflict { id, version });
            }
        }

        let slot = self.arena.len();
        self.arena.push(row.clone());
        let chain = self.index.entry(id).or_insert_with(|| Chain {
            slots: BTreeMap::new(),
            latest: slot,
        });
        chain.slots.insert(version, slot);
        if let Some((_, &max_slot)) = chain.slots.last_key_value() {
            chain.latest = max_slot;
        }
        Ok(row)
    }

    fn latest_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let slot = self.index.get(&id)?.latest;
        self.arena.get_mut(slot)
    }

    fn latest_rows(&self) -> impl Iterator<Item = &T> {
        self.index
            .values()
            .filter_map(|chain| self.arena.get(chain.latest))
    }

    fn versions(&self, id: EntityId) -> Vec<Version> {
        self.index
            .get(&id)
            .map(|chain| chain.slots.keys().copied().collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct State {
    employees: HashMap<ActorId, Employee>,
    responsibilities: Vec<(OrganizationId, ActorId)>,
    tenders: VersionTable<Tender>,
    bids: VersionTable<Bid>,
}

/// Cheaply cloneable handle; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an employee and return it.
    pub async fn add_employee(&self, username: &str) -> Employee {
        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            username: username.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        self.state
            .write()
            .await
            .employees
            .insert(employee.id, employee.clone());
        employee
    }

    /// Allocate an organization id. Organizations exist here only as the
    /// target of responsibilities.
    pub fn add_organization(&self) -> OrganizationId {
        Uuid::new_v4()
    }

    /// Make `actor` responsible for `organization`.
    pub async fn add_responsibility(&self, organization: OrganizationId, actor: ActorId) {
        self.state
            .write()
            .await
            .responsibilities
            .push((organization, actor));
    }

    /// Every stored version number of a tender, ascending.
    pub async fn tender_versions(&self, id: EntityId) -> Vec<Version> {
        self.state.read().await.tenders.versions(id)
    }

    /// Every stored version number of a bid, ascending.
    pub async fn bid_versions(&self, id: EntityId) -> Vec<Version> {
        self.state.read().await.bids.versions(id)
    }
}

fn sort_by_name(mut tenders: Vec<Tender>) -> Vec<Tender> {
    tenders.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    tenders
}

impl ActorDirectory for InMemoryStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<Employee>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .find(|e| e.username == username)
            .cloned())
    }

    async fn get_by_id(&self, id: ActorId) -> Result<Option<Employee>, StoreError> {
        Ok(self.state.read().await.employees.get(&id).cloned())
    }

    async fn is_responsible(
        &self,
        organization: OrganizationId,
        actor: ActorId,
    ) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .responsibilities
            .iter()
            .any(|&(org, user)| org == organization && user == actor))
    }

    async fn has_any_responsibility(&self, actor: ActorId) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state.responsibilities.iter().any(|&(_, user)| user == actor))
    }

    async fn organization_of(&self, actor: ActorId) -> Result<Option<OrganizationId>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .responsibilities
            .iter()
            .find(|&&(_, user)| user == actor)
            .map(|&(org, _)| org))
    }
}

impl TenderStore for InMemoryStore {
    async fn get(
        &self,
        id: EntityId,
        version: VersionSelector,
    ) -> Result<Option<Tender>, StoreError> {
        Ok(self.state.read().await.tenders.get(id, version).cloned())
    }

    async fn latest_version_number(&self, id: EntityId) -> Result<Option<Version>, StoreError> {
        Ok(self.state.read().await.tenders.latest_version(id))
    }

    async fn insert_version(&self, row: NewTenderVersion) -> Result<Tender, StoreError> {
        let now = Utc::now();
        let tender = Tender {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            name: row.name,
            description: row.description,
            service_type: row.service_type,
            status: row.status,
            organization_id: row.organization_id,
            version: row.version,
            creator_username: row.creator_username,
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.tenders.insert(tender)
    }

    async fn update_status_of_latest(
        &self,
        id: EntityId,
        status: TenderStatus,
    ) -> Result<Option<Tender>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.tenders.latest_mut(id).map(|tender| {
            tender.status = status;
            tender.updated_at = Utc::now();
            tender.clone()
        }))
    }

    async fn list_by_creator(
        &self,
        username: &str,
        page: Pagination,
    ) -> Result<Vec<Tender>, StoreError> {
        let state = self.state.read().await;
        let rows = state
            .tenders
            .latest_rows()
            .filter(|t| t.creator_username == username)
            .cloned()
            .collect();
        Ok(page.slice(sort_by_name(rows)))
    }

    async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: Pagination,
    ) -> Result<Vec<Tender>, StoreError> {
        let state = self.state.read().await;
        let rows = state
            .tenders
            .latest_rows()
            .filter(|t| t.status == TenderStatus::Published)
            .filter(|t| service_types.is_empty() || service_types.contains(&t.service_type))
            .cloned()
            .collect();
        Ok(page.slice(sort_by_name(rows)))
    }
}

impl BidStore for InMemoryStore {
    async fn get(&self, id: EntityId, version: VersionSelector) -> Result<Option<Bid>, StoreError> {
        Ok(self.state.read().await.bids.get(id, version).cloned())
    }

    async fn latest_version_number(&self, id: EntityId) -> Result<Option<Version>, StoreError> {
        Ok(self.state.read().await.bids.latest_version(id))
    }

    async fn insert_version(&self, row: NewBidVersion) -> Result<Bid, StoreError> {
        let now = Utc::now();
        let bid = Bid {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            name: row.name,
            description: row.description,
            author_type: row.author_type,
            author_id: row.author_id,
            status: row.status,
            version: row.version,
            tender_id: row.tender_id,
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.bids.insert(bid)
    }

    async fn update_status_of_latest(
        &self,
        id: EntityId,
        status: BidStatus,
    ) -> Result<Option<Bid>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.bids.latest_mut(id).map(|bid| {
            bid.status = status;
            bid.updated_at = Utc::now();
            bid.clone()
        }))
    }
}
