use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};

use crate::services::identity::{
    provider::{IdentityError, IdentityProvider, PrincipalAttributes},
    token::TokenVerifier,
};

/// Identity provider bound to one request's `Authorization: Bearer` token.
///
/// Built fresh per request; the token is verified on every fetch.
#[derive(Clone)]
pub struct BearerIdentity {
    verifier: Arc<TokenVerifier>,
    token: Option<String>,
}

impl std::fmt::Debug for BearerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the token
        f.debug_struct("BearerIdentity")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl BearerIdentity {
    pub fn new(verifier: Arc<TokenVerifier>, token: Option<String>) -> Self {
        Self { verifier, token }
    }

    pub fn from_headers(verifier: Arc<TokenVerifier>, headers: &HeaderMap) -> Self {
        Self::new(verifier, bearer_token(headers).map(str::to_string))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl IdentityProvider for BearerIdentity {
    async fn fetch_principal_attributes(&self) -> Result<PrincipalAttributes, IdentityError> {
        let token = self.token.as_deref().ok_or(IdentityError::NoSession)?;

        let claims = self.verifier.verify(token).map_err(|err| {
            tracing::warn!(error = %err, "identity token verification failed");
            IdentityError::from(err)
        })?;

        Ok(claims.into())
    }
}
