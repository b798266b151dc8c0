use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::{empire_repo, error::RepoError};
use crate::services::directory::{
    client::{DirectoryError, DirectoryResult, EmpireDirectory},
    types::{Empire, EmpireType},
};

/// Postgres-backed empire directory.
#[derive(Clone, Debug)]
pub struct PgEmpireDirectory {
    pool: PgPool,
}

impl PgEmpireDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFrom<empire_repo::EmpireRow> for Empire {
    type Error = RepoError;

    fn try_from(row: empire_repo::EmpireRow) -> Result<Self, Self::Error> {
        let empire_type = row
            .empire_type
            .parse::<EmpireType>()
            .map_err(|e| RepoError::InvalidRow(e.to_string()))?;

        Ok(Empire {
            name: row.name,
            session_name: row.session_name,
            player_name: row.player_name,
            empire_type,
        })
    }
}

// pool/transport trouble vs. everything else
fn classify(e: RepoError) -> DirectoryError {
    match e {
        RepoError::Db(
            err @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)),
        ) => DirectoryError::Unavailable(err.to_string()),
        other => DirectoryError::Repo(other),
    }
}

#[async_trait]
impl EmpireDirectory for PgEmpireDirectory {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn get_empire(
        &self,
        session_name: &str,
        empire_name: &str,
    ) -> DirectoryResult<Option<Empire>> {
        let row = empire_repo::get(&self.pool, session_name, empire_name)
            .await
            .map_err(classify)?;

        Ok(row.map(Empire::try_from).transpose()?)
    }

    async fn get_gm_empire_for_player(
        &self,
        session_name: &str,
        username: &str,
    ) -> DirectoryResult<Option<Empire>> {
        let row = empire_repo::find_gm_for_player(&self.pool, session_name, username)
            .await
            .map_err(classify)?;

        Ok(row.map(Empire::try_from).transpose()?)
    }
}
