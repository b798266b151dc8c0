//! Empire access decision.
//!
//! Ordered, short-circuiting:
//! 1. empty username → `not_authenticated` (no lookups)
//! 2. empire missing → `empire_not_found`
//! 3. owner → authorized (GM lookup skipped)
//! 4. GM of the same session → authorized
//! 5. otherwise → `not_owner`
//!
//! Any directory failure resolves to `not_owner` (fail-closed). Nothing from
//! the directory is ever propagated to the caller.
use std::sync::Arc;

use crate::services::authz::result::{AuthorizationResult, DenialReason};
use crate::services::directory::{DirectoryResult, EmpireDirectory};

#[derive(Clone)]
pub struct AuthorizationService {
    directory: Arc<dyn EmpireDirectory>,
}

impl std::fmt::Debug for AuthorizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationService")
            .field("directory", &self.directory.backend_name())
            .finish()
    }
}

impl AuthorizationService {
    pub fn new(directory: Arc<dyn EmpireDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &dyn EmpireDirectory {
        self.directory.as_ref()
    }

    pub async fn can_access_empire(
        &self,
        username: &str,
        session_name: &str,
        empire_name: &str,
    ) -> AuthorizationResult {
        if username.is_empty() {
            return AuthorizationResult::denied(DenialReason::NotAuthenticated);
        }

        let result = match self.decide(username, session_name, empire_name).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    backend = self.directory.backend_name(),
                    "empire lookup failed, denying access"
                );
                AuthorizationResult::denied(DenialReason::NotOwner)
            }
        };

        tracing::debug!(
            authorized = result.is_authorized(),
            reason = result.reason().map(|r| r.as_str()),
            "empire access decided"
        );

        result
    }

    async fn decide(
        &self,
        username: &str,
        session_name: &str,
        empire_name: &str,
    ) -> DirectoryResult<AuthorizationResult> {
        let Some(empire) = self.directory.get_empire(session_name, empire_name).await? else {
            return Ok(AuthorizationResult::denied(DenialReason::EmpireNotFound));
        };

        if empire.is_owned_by(username) {
            return Ok(AuthorizationResult::Authorized);
        }

        if self.is_game_master(username, session_name).await {
            return Ok(AuthorizationResult::Authorized);
        }

        Ok(AuthorizationResult::denied(DenialReason::NotOwner))
    }

    /// Whether `username` runs the GM empire of `session_name`.
    ///
    /// Session-scoped; a lookup failure is `false`.
    pub async fn is_game_master(&self, username: &str, session_name: &str) -> bool {
        if username.is_empty() {
            return false;
        }

        match self
            .directory
            .get_gm_empire_for_player(session_name, username)
            .await
        {
            // the directory contract already scopes the lookup; re-check anyway
            Ok(Some(empire)) => {
                empire.is_game_master_of(session_name) && empire.is_owned_by(username)
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    backend = self.directory.backend_name(),
                    "gm lookup failed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::directory::{Empire, EmpireType};
    use crate::test_support::{DirectoryCall, MemoryDirectory, empire};

    fn service(directory: &Arc<MemoryDirectory>) -> AuthorizationService {
        AuthorizationService::new(directory.clone())
    }

    fn seeded() -> Arc<MemoryDirectory> {
        Arc::new(MemoryDirectory::new(vec![
            empire("S1", "E1", "alice", EmpireType::Active),
            empire("S1", "E2", "dave", EmpireType::Npc),
            empire("S1", "Overseer", "gm", EmpireType::Gm),
            empire("S2", "E1", "erin", EmpireType::Active),
            empire("S2", "Overseer", "other-gm", EmpireType::Gm),
        ]))
    }

    #[tokio::test]
    async fn owner_is_authorized_without_gm_lookup() {
        let dir = seeded();
        let result = service(&dir).can_access_empire("alice", "S1", "E1").await;

        assert_eq!(result, AuthorizationResult::Authorized);
        assert_eq!(
            dir.calls(),
            vec![DirectoryCall::get_empire("S1", "E1")]
        );
    }

    #[tokio::test]
    async fn non_owner_without_gm_standing_is_denied() {
        let dir = seeded();
        let result = service(&dir).can_access_empire("bob", "S1", "E1").await;

        assert_eq!(result, AuthorizationResult::denied(DenialReason::NotOwner));
        assert_eq!(result.redirect_to(), Some("/unauthorized"));
        assert_eq!(
            dir.calls(),
            vec![
                DirectoryCall::get_empire("S1", "E1"),
                DirectoryCall::get_gm("S1", "bob"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_empire_is_reported_as_not_found() {
        let dir = seeded();
        let result = service(&dir).can_access_empire("alice", "S1", "Nope").await;

        assert_eq!(
            result,
            AuthorizationResult::denied(DenialReason::EmpireNotFound)
        );
        assert_eq!(result.redirect_to(), Some("/unauthorized"));
    }

    #[tokio::test]
    async fn empty_username_never_touches_the_directory() {
        let dir = seeded();
        let result = service(&dir).can_access_empire("", "S1", "E1").await;

        assert_eq!(
            result,
            AuthorizationResult::denied(DenialReason::NotAuthenticated)
        );
        assert_eq!(result.redirect_to(), Some("/login"));
        assert!(dir.calls().is_empty());
    }

    #[tokio::test]
    async fn gm_can_access_any_empire_of_their_session() {
        let dir = seeded();
        let svc = service(&dir);

        assert!(svc.can_access_empire("gm", "S1", "E1").await.is_authorized());
        assert!(svc.can_access_empire("gm", "S1", "E2").await.is_authorized());
        assert!(svc.is_game_master("gm", "S1").await);
    }

    #[tokio::test]
    async fn gm_authority_stops_at_the_session_boundary() {
        let dir = seeded();
        let svc = service(&dir);

        // same empire name exists in both sessions
        assert_eq!(
            svc.can_access_empire("gm", "S2", "E1").await,
            AuthorizationResult::denied(DenialReason::NotOwner)
        );
        assert!(!svc.is_game_master("gm", "S2").await);
        assert!(!svc.is_game_master("other-gm", "S1").await);
    }

    #[tokio::test]
    async fn gm_record_from_another_session_is_not_trusted() {
        // a directory that ignores the session filter must not widen GM authority
        let dir = Arc::new(MemoryDirectory::new(vec![
            empire("S1", "E1", "alice", EmpireType::Active),
            empire("S2", "Overseer", "gm", EmpireType::Gm),
        ]));
        dir.ignore_session_on_gm_lookup();

        let svc = service(&dir);
        assert!(!svc.is_game_master("gm", "S1").await);
        assert!(!svc.can_access_empire("gm", "S1", "E1").await.is_authorized());
    }

    #[tokio::test]
    async fn failing_empire_lookup_fails_closed() {
        let dir = seeded();
        dir.fail_empire_lookups();

        for username in ["alice", "gm", "bob"] {
            assert_eq!(
                service(&dir).can_access_empire(username, "S1", "E1").await,
                AuthorizationResult::denied(DenialReason::NotOwner)
            );
        }
    }

    #[tokio::test]
    async fn failing_gm_lookup_fails_closed() {
        let dir = seeded();
        dir.fail_gm_lookups();
        let svc = service(&dir);

        assert!(!svc.is_game_master("gm", "S1").await);
        assert_eq!(
            svc.can_access_empire("gm", "S1", "E1").await,
            AuthorizationResult::denied(DenialReason::NotOwner)
        );
        // the owner short-circuit does not need the GM lookup
        assert!(svc.can_access_empire("alice", "S1", "E1").await.is_authorized());
    }

    #[tokio::test]
    async fn ownership_invariant_holds_across_the_table() {
        let dir = seeded();
        let svc = service(&dir);
        let empires: Vec<Empire> = dir.empires().to_vec();
        let users = ["alice", "bob", "dave", "erin", "gm", "other-gm"];

        for e in &empires {
            for user in users {
                let gm_here = empires.iter().any(|g| {
                    g.empire_type == EmpireType::Gm
                        && g.session_name == e.session_name
                        && g.player_name == user
                });
                let expected = e.player_name == user || gm_here;

                let result = svc.can_access_empire(user, &e.session_name, &e.name).await;
                assert_eq!(result.is_authorized(), expected, "{user} -> {e:?}");
                if !expected {
                    assert_eq!(result.reason(), Some(DenialReason::NotOwner));
                }
            }
        }
    }

    #[tokio::test]
    async fn denials_never_carry_identifiers() {
        let dir = Arc::new(MemoryDirectory::new(vec![empire(
            "Andromeda-Session",
            "Zyloth-Hegemony",
            "mallory-owner",
            EmpireType::Active,
        )]));
        let svc = service(&dir);

        let mut denials = vec![
            svc.can_access_empire("trudy-intruder", "Andromeda-Session", "Zyloth-Hegemony")
                .await,
            svc.can_access_empire("trudy-intruder", "Andromeda-Session", "Missing-Realm")
                .await,
            svc.can_access_empire("", "Andromeda-Session", "Zyloth-Hegemony")
                .await,
        ];
        dir.fail_empire_lookups();
        denials.push(
            svc.can_access_empire("trudy-intruder", "Andromeda-Session", "Zyloth-Hegemony")
                .await,
        );

        for denial in denials {
            assert!(!denial.is_authorized());
            let body = serde_json::to_string(&denial).unwrap();
            for needle in [
                "Zyloth-Hegemony",
                "Missing-Realm",
                "Andromeda-Session",
                "mallory-owner",
                "trudy-intruder",
                "ACTIVE",
            ] {
                assert!(!body.contains(needle), "{body} leaks {needle}");
            }
        }
    }
}
