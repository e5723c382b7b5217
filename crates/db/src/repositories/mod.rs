//! Repository layer: one zero-sized struct per table group, each exposing
//! async associated functions over a `&PgPool`.

pub mod bid_repo;
pub mod employee_repo;
pub mod tender_repo;

pub use bid_repo::BidRepo;
pub use employee_repo::{EmployeeRepo, OrganizationRepo};
pub use tender_repo::TenderRepo;
