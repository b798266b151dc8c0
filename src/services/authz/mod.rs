pub mod evaluation;
pub mod result;
pub mod service;

pub use evaluation::{AuthorizationState, AuthorizationWatch};
pub use result::{AuthorizationResult, DenialReason};
pub use service::AuthorizationService;
