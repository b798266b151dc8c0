pub mod bearer;
pub mod provider;
pub mod token;

pub use bearer::BearerIdentity;
pub use provider::{
    IdentityError, IdentityProvider, Principal, PrincipalAttributes, resolve_principal,
};
pub use token::{TokenError, TokenVerifier};
