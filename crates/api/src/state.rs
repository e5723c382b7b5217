use std::sync::Arc;

use tenderflow_core::bid::BidWorkflow;
use tenderflow_core::tender::TenderWorkflow;
use tenderflow_db::PgStore;

use crate::config::ServerConfig;

pub type Tenders = TenderWorkflow<PgStore, PgStore>;
pub type Bids = BidWorkflow<PgStore, PgStore, PgStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tenderflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tender workflow engine.
    pub tenders: Arc<Tenders>,
    /// Bid workflow engine. Shares the tender engine for decisions.
    pub bids: Arc<Bids>,
}

impl AppState {
    /// Wire both engines to one PostgreSQL-backed store.
    pub fn new(pool: tenderflow_db::DbPool, config: ServerConfig) -> Self {
        let store = PgStore::new(pool.clone());
        let tenders = Arc::new(TenderWorkflow::new(store.clone(), store.clone()));
        let bids = Arc::new(BidWorkflow::new(store, Arc::clone(&tenders)));
        Self {
            pool,
            config: Arc::new(config),
            tenders,
            bids,
        }
    }
}
