//! Procurement workflow core: versioned tenders and bids, and the
//! responsibility-based authorization that gates every mutation.
//!
//! The engines talk to their collaborators only through the port traits in
//! [`directory`] and [`store`]; `tenderflow-db` provides the PostgreSQL
//! adapter and [`memory`] an in-process one.

pub mod authz;
pub mod bid;
pub mod directory;
pub mod entity;
pub mod error;
pub mod memory;
pub mod pagination;
pub mod status;
pub mod store;
pub mod tender;
pub mod types;
