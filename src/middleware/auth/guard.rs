//! Route gate state machine.
//!
//! ```text
//! CheckingAuth ─┬─> Unauthenticated                       (login prompt)
//!               └─> Authenticated ─┬─> children          (static / no empire access)
//!                                  └─> CheckingAuthz ─┬─> Authorized (children)
//!                                                     └─> Denied     (redirect)
//! ```
//!
//! Exactly one view is produced per state. The guard itself performs no I/O;
//! the middleware feeds it the identity and authorization outcomes.
use url::form_urlencoded;

use crate::services::authz::{AuthorizationState, DenialReason, result::UNAUTHORIZED_PATH};
use crate::services::identity::Principal;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const VERIFYING_MESSAGE: &str = "Verifying access...";

/// Per-route gate flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteAccess {
    pub requires_empire_access: bool,
    // wins over `requires_empire_access`
    pub static_page: bool,
}

impl RouteAccess {
    pub const fn static_page() -> Self {
        Self {
            requires_empire_access: false,
            static_page: true,
        }
    }

    pub const fn authenticated() -> Self {
        Self {
            requires_empire_access: false,
            static_page: false,
        }
    }

    pub const fn empire() -> Self {
        Self {
            requires_empire_access: true,
            static_page: false,
        }
    }

    pub fn needs_authorization(&self) -> bool {
        self.requires_empire_access && !self.static_page
    }
}

/// Session/empire parameters of the matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub session_name: Option<String>,
    pub empire_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    CheckingAuth,
    Unauthenticated,
    Authenticated,
    CheckingAuthz,
    Authorized,
    Denied { reason: DenialReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    Loading(&'static str),
    LoginPrompt,
    Redirect(String),
    Children,
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    access: RouteAccess,
    state: GuardState,
    principal: Option<Principal>,
}

impl RouteGuard {
    pub fn new(access: RouteAccess) -> Self {
        Self {
            access,
            state: GuardState::CheckingAuth,
            principal: None,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn needs_authorization(&self) -> bool {
        self.state == GuardState::Authenticated && self.access.needs_authorization()
    }

    /// Identity outcome; only meaningful while `CheckingAuth`.
    pub fn on_identity(&mut self, principal: Option<Principal>) {
        if self.state != GuardState::CheckingAuth {
            return;
        }
        self.state = match principal {
            Some(principal) => {
                self.principal = Some(principal);
                GuardState::Authenticated
            }
            None => GuardState::Unauthenticated,
        };
    }

    /// Parameters to hand to the authorization evaluation.
    ///
    /// Both absent unless this route actually needs an empire check, so the
    /// evaluation settles without a lookup.
    pub fn authorization_params<'a>(
        &self,
        params: &'a RouteParams,
    ) -> (Option<&'a str>, Option<&'a str>) {
        if !self.access.needs_authorization() {
            return (None, None);
        }
        (
            params.session_name.as_deref(),
            params.empire_name.as_deref(),
        )
    }

    /// Authorization outcome (loading or settled).
    pub fn on_authorization(&mut self, authz: &AuthorizationState) {
        if !matches!(
            self.state,
            GuardState::Authenticated | GuardState::CheckingAuthz
        ) || !self.access.needs_authorization()
        {
            return;
        }

        self.state = if authz.is_loading {
            GuardState::CheckingAuthz
        } else if authz.is_authorized {
            GuardState::Authorized
        } else {
            GuardState::Denied {
                reason: authz.denial_reason().unwrap_or(DenialReason::NotOwner),
            }
        };
    }

    pub fn view(&self) -> GuardView {
        match &self.state {
            GuardState::CheckingAuth => GuardView::Loading(LOADING_MESSAGE),
            GuardState::Unauthenticated => GuardView::LoginPrompt,
            GuardState::Authenticated if self.access.needs_authorization() => {
                GuardView::Loading(VERIFYING_MESSAGE)
            }
            GuardState::Authenticated => GuardView::Children,
            GuardState::CheckingAuthz => GuardView::Loading(VERIFYING_MESSAGE),
            GuardState::Authorized => GuardView::Children,
            GuardState::Denied { reason } => GuardView::Redirect(unauthorized_location(*reason)),
        }
    }
}

/// `/unauthorized?reason=<code>`; carries nothing but the reason code.
pub fn unauthorized_location(reason: DenialReason) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("reason", reason.as_str())
        .finish();
    format!("{UNAUTHORIZED_PATH}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::authz::AuthorizationResult;
    use crate::services::identity::PrincipalAttributes;

    fn alice() -> Option<Principal> {
        Principal::from_attributes(PrincipalAttributes {
            username: Some("alice".into()),
            groups: vec![],
        })
    }

    fn settled(result: AuthorizationResult) -> AuthorizationState {
        AuthorizationState {
            is_authorized: result.is_authorized(),
            is_loading: false,
            error: result.reason().map(|r| r.message().to_string()),
            auth_result: Some(result),
        }
    }

    fn params() -> RouteParams {
        RouteParams {
            session_name: Some("S1".into()),
            empire_name: Some("E1".into()),
        }
    }

    #[test]
    fn starts_loading() {
        let guard = RouteGuard::new(RouteAccess::empire());
        assert_eq!(guard.state(), &GuardState::CheckingAuth);
        assert_eq!(guard.view(), GuardView::Loading(LOADING_MESSAGE));
    }

    #[test]
    fn unauthenticated_shows_only_the_login_prompt() {
        let mut guard = RouteGuard::new(RouteAccess::empire());
        guard.on_identity(None);

        assert_eq!(guard.state(), &GuardState::Unauthenticated);
        assert_eq!(guard.view(), GuardView::LoginPrompt);
        assert!(!guard.needs_authorization());

        // late authorization outcomes cannot unlock the route
        guard.on_authorization(&settled(AuthorizationResult::Authorized));
        assert_eq!(guard.view(), GuardView::LoginPrompt);
    }

    #[test]
    fn identity_is_accepted_once() {
        let mut guard = RouteGuard::new(RouteAccess::authenticated());
        guard.on_identity(alice());
        guard.on_identity(None);

        assert_eq!(guard.state(), &GuardState::Authenticated);
        assert_eq!(guard.principal().map(|p| p.username()), Some("alice"));
    }

    #[test]
    fn authenticated_only_route_renders_children_and_skips_authz() {
        let mut guard = RouteGuard::new(RouteAccess::authenticated());
        guard.on_identity(alice());

        assert!(!guard.needs_authorization());
        assert_eq!(guard.authorization_params(&params()), (None, None));
        assert_eq!(guard.view(), GuardView::Children);

        guard.on_authorization(&settled(AuthorizationResult::denied(DenialReason::NotOwner)));
        assert_eq!(guard.view(), GuardView::Children);
    }

    #[test]
    fn static_page_wins_over_empire_access() {
        let access = RouteAccess {
            requires_empire_access: true,
            static_page: true,
        };
        let mut guard = RouteGuard::new(access);
        guard.on_identity(alice());

        assert!(!guard.needs_authorization());
        assert_eq!(guard.authorization_params(&params()), (None, None));
        assert_eq!(guard.view(), GuardView::Children);

        guard.on_authorization(&settled(AuthorizationResult::denied(DenialReason::NotOwner)));
        assert_eq!(guard.view(), GuardView::Children);
    }

    #[test]
    fn empire_route_verifies_then_renders_children() {
        let mut guard = RouteGuard::new(RouteAccess::empire());
        guard.on_identity(alice());

        assert!(guard.needs_authorization());
        assert_eq!(guard.authorization_params(&params()), (Some("S1"), Some("E1")));
        assert_eq!(guard.view(), GuardView::Loading(VERIFYING_MESSAGE));

        guard.on_authorization(&AuthorizationState::loading());
        assert_eq!(guard.state(), &GuardState::CheckingAuthz);
        assert_eq!(guard.view(), GuardView::Loading(VERIFYING_MESSAGE));

        guard.on_authorization(&settled(AuthorizationResult::Authorized));
        assert_eq!(guard.state(), &GuardState::Authorized);
        assert_eq!(guard.view(), GuardView::Children);
    }

    #[test]
    fn denial_redirects_with_the_reason_only() {
        let mut guard = RouteGuard::new(RouteAccess::empire());
        guard.on_identity(alice());
        guard.on_authorization(&settled(AuthorizationResult::denied(
            DenialReason::EmpireNotFound,
        )));

        assert_eq!(
            guard.view(),
            GuardView::Redirect("/unauthorized?reason=empire_not_found".into())
        );
    }

    #[test]
    fn denial_without_reason_defaults_to_not_owner() {
        let mut guard = RouteGuard::new(RouteAccess::empire());
        guard.on_identity(alice());
        guard.on_authorization(&AuthorizationState {
            is_authorized: false,
            is_loading: false,
            error: Some("Missing session or empire name".into()),
            auth_result: None,
        });

        assert_eq!(
            guard.state(),
            &GuardState::Denied {
                reason: DenialReason::NotOwner
            }
        );
        assert_eq!(
            guard.view(),
            GuardView::Redirect("/unauthorized?reason=not_owner".into())
        );
    }
}
