pub mod access;
pub mod guard;

pub use access::protect;
pub use guard::RouteAccess;
