pub mod bid;
pub mod tender;
