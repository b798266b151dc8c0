pub mod authz;
pub mod directory;
pub mod identity;
