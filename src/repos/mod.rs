pub mod empire_repo;
pub mod error;
