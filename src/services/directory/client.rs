//! Empire directory interface used by the authorization service.
use async_trait::async_trait;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::directory::types::Empire;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory-layer errors (storage/transport/row decoding).
///
/// Note:
/// - Kept independent from `AppError`. The authorization service swallows these
///   into a denial (fail-closed); they never reach a response body.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the empires known to the game backend.
///
/// Implementations are shared behind `Arc<dyn EmpireDirectory>`.
#[async_trait]
pub trait EmpireDirectory: Send + Sync {
    // Returns the directory backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Empire identified by (session_name, empire_name), `None` if absent.
    async fn get_empire(
        &self,
        session_name: &str,
        empire_name: &str,
    ) -> DirectoryResult<Option<Empire>>;

    // The GM empire of `session_name` run by `username`, `None` if that player
    // does not run the session's GM empire.
    async fn get_gm_empire_for_player(
        &self,
        session_name: &str,
        username: &str,
    ) -> DirectoryResult<Option<Empire>>;
}
