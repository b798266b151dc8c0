//! Re-evaluating authorization state for one consumer (a route guard, a
//! long-lived connection, ...).
//!
//! Each evaluation runs: identity fetch → `can_access_empire` → commit.
//! Evaluations carry an explicit `EvaluationToken`; a commit is applied only
//! while its generation is still the current one. Superseded or cancelled
//! evaluations run to completion but their result is dropped.
//!
//! There is no timeout here: a lookup that never resolves keeps the state in
//! `is_loading`.
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::services::authz::{
    result::{AuthorizationResult, DenialReason},
    service::AuthorizationService,
};
use crate::services::identity::{IdentityProvider, resolve_principal};

pub const MISSING_PARAMS_MESSAGE: &str = "Missing session or empire name";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "User not authenticated";

/// Observable state of the current evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationState {
    pub is_authorized: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub auth_result: Option<AuthorizationResult>,
}

impl AuthorizationState {
    pub fn loading() -> Self {
        Self {
            is_authorized: false,
            is_loading: true,
            error: None,
            auth_result: None,
        }
    }

    fn missing_params() -> Self {
        Self {
            is_authorized: false,
            is_loading: false,
            error: Some(MISSING_PARAMS_MESSAGE.to_string()),
            auth_result: None,
        }
    }

    fn not_authenticated() -> Self {
        Self {
            is_authorized: false,
            is_loading: false,
            error: Some(NOT_AUTHENTICATED_MESSAGE.to_string()),
            auth_result: Some(AuthorizationResult::denied(
                DenialReason::NotAuthenticated,
            )),
        }
    }

    fn from_result(result: AuthorizationResult) -> Self {
        Self {
            is_authorized: result.is_authorized(),
            is_loading: false,
            error: result.reason().map(|r| r.message().to_string()),
            auth_result: Some(result),
        }
    }

    /// Reason to report when this state is a denial.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        if self.is_authorized || self.is_loading {
            return None;
        }
        Some(
            self.auth_result
                .and_then(|r| r.reason())
                .unwrap_or(DenialReason::NotOwner),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Capability to commit the result of exactly one evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationToken {
    generation: Generation,
    current: Arc<AtomicU64>,
    tx: Arc<watch::Sender<AuthorizationState>>,
}

impl EvaluationToken {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation.0
    }

    /// Returns `false` (and changes nothing) when superseded.
    pub fn commit(&self, state: AuthorizationState) -> bool {
        // checked under the channel lock, which is also where generations advance
        self.tx.send_if_modified(|slot| {
            if !self.is_current() {
                return false;
            }
            *slot = state;
            true
        })
    }
}

type Params = (Option<String>, Option<String>);

/// Authorization state for a changing (session, empire) pair.
pub struct AuthorizationWatch {
    authz: Arc<AuthorizationService>,
    identity: Arc<dyn IdentityProvider>,
    current: Arc<AtomicU64>,
    tx: Arc<watch::Sender<AuthorizationState>>,
    params: Option<Params>,
}

impl AuthorizationWatch {
    pub fn new(authz: Arc<AuthorizationService>, identity: Arc<dyn IdentityProvider>) -> Self {
        let (tx, _rx) = watch::channel(AuthorizationState::loading());
        Self {
            authz,
            identity,
            current: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
            params: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthorizationState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> AuthorizationState {
        self.tx.borrow().clone()
    }

    /// Re-evaluate when the pair differs from the previous one.
    ///
    /// Returns the spawned evaluation, `None` when nothing was spawned
    /// (unchanged params, or params missing and settled synchronously).
    pub fn set_params(
        &mut self,
        session_name: Option<&str>,
        empire_name: Option<&str>,
    ) -> Option<JoinHandle<()>> {
        let next: Params = (
            session_name.map(str::to_string),
            empire_name.map(str::to_string),
        );
        if self.params.as_ref() == Some(&next) {
            return None;
        }
        self.params = Some(next.clone());

        let (Some(session_name), Some(empire_name)) = next else {
            let token = self.begin(AuthorizationState::missing_params());
            tracing::debug!(generation = token.generation.0, "authorization params missing");
            return None;
        };

        let token = self.begin(AuthorizationState::loading());
        let authz = self.authz.clone();
        let identity = self.identity.clone();

        Some(tokio::spawn(async move {
            let state = evaluate(&authz, identity.as_ref(), &session_name, &empire_name).await;
            if !token.commit(state) {
                tracing::debug!(
                    generation = token.generation.0,
                    "stale authorization result dropped"
                );
            }
        }))
    }

    /// Supersede every in-flight evaluation without touching the state.
    pub fn cancel(&self) {
        self.tx.send_if_modified(|_| {
            self.current.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    /// Wait for the first non-loading state.
    pub async fn settled(&self) -> AuthorizationState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.is_loading).await {
            Ok(state) => (*state).clone(),
            // sender lives in self; unreachable while borrowed
            Err(_) => AuthorizationState::not_authenticated(),
        }
    }

    // Advance the generation and publish `initial` atomically.
    fn begin(&self, initial: AuthorizationState) -> EvaluationToken {
        let mut generation = Generation(0);
        self.tx.send_modify(|slot| {
            generation = Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1);
            *slot = initial;
        });

        EvaluationToken {
            generation,
            current: self.current.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl Drop for AuthorizationWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for AuthorizationWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationWatch")
            .field("generation", &self.current.load(Ordering::SeqCst))
            .field("state", &*self.tx.borrow())
            .finish()
    }
}

/// One full evaluation for a fixed pair.
pub async fn evaluate(
    authz: &AuthorizationService,
    identity: &dyn IdentityProvider,
    session_name: &str,
    empire_name: &str,
) -> AuthorizationState {
    let Some(principal) = resolve_principal(identity).await else {
        return AuthorizationState::not_authenticated();
    };

    let result = authz
        .can_access_empire(principal.username(), session_name, empire_name)
        .await;

    AuthorizationState::from_result(result)
}
