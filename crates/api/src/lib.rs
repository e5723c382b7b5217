//! Tenderflow HTTP API library.
//!
//! Exposes config, state, error handling, and the router so integration tests
//! and the binary entrypoint build the same application.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
