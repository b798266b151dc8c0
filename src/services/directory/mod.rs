pub mod client;
pub mod postgres;
pub mod types;

pub use client::{DirectoryError, DirectoryResult, EmpireDirectory};
pub use postgres::PgEmpireDirectory;
pub use types::{Empire, EmpireType};
