//! Identity provider contract and principal resolution.
use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::services::identity::token::TokenError;

/// Attributes reported by the identity provider for the current session.
///
/// `username` may be missing; callers treat that like a failed fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalAttributes {
    pub username: Option<String>,
    pub groups: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("no active session")]
    NoSession,
    #[error("identity token rejected: {0}")]
    Rejected(#[from] TokenError),
}

/// Supplies the authenticated principal of one session.
///
/// Implementations are bound to a single caller (ex: one HTTP request) and
/// must not cache principals across sessions.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_principal_attributes(&self) -> Result<PrincipalAttributes, IdentityError>;
}

/// The resolved actor for one authorization evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    groups: BTreeSet<String>,
}

impl Principal {
    /// `None` unless the attributes carry a non-blank username.
    ///
    /// The username is kept byte for byte; ownership compares it exactly.
    pub fn from_attributes(attrs: PrincipalAttributes) -> Option<Self> {
        let username = attrs.username?;
        if username.trim().is_empty() {
            return None;
        }

        Some(Self {
            username,
            groups: attrs.groups.into_iter().collect(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }
}

/// Fetch attributes once and resolve a principal.
///
/// A fetch error and a missing username both come back as `None`.
pub async fn resolve_principal(provider: &dyn IdentityProvider) -> Option<Principal> {
    match provider.fetch_principal_attributes().await {
        Ok(attrs) => {
            let principal = Principal::from_attributes(attrs);
            if principal.is_none() {
                tracing::debug!("identity provider returned no username");
            }
            principal
        }
        Err(err) => {
            tracing::debug!(error = %err, "identity fetch failed");
            None
        }
    }
}
