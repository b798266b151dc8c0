/*
 * Responsibility
 * - empires テーブル向け SQLx 操作 (read-only)
 * - 主キーは (session_name, name)。GM empire は session ごとに高々 1 つ (partial unique index)
 * - empire_type は TEXT のまま返し、型への変換は directory 側で行う
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct EmpireRow {
    pub name: String,
    pub session_name: String,
    pub player_name: String,
    pub empire_type: String,
}

pub async fn get(db: &PgPool, session_name: &str, name: &str) -> RepoResult<Option<EmpireRow>> {
    let row = sqlx::query_as::<_, EmpireRow>(
        r#"
        SELECT name, session_name, player_name, empire_type
        FROM empires
        WHERE session_name = $1 AND name = $2
        "#,
    )
    .bind(session_name)
    .bind(name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_gm_for_player(
    db: &PgPool,
    session_name: &str,
    player_name: &str,
) -> RepoResult<Option<EmpireRow>> {
    let row = sqlx::query_as::<_, EmpireRow>(
        r#"
        SELECT name, session_name, player_name, empire_type
        FROM empires
        WHERE session_name = $1
          AND player_name = $2
          AND empire_type = 'GM'
        LIMIT 1
        "#,
    )
    .bind(session_name)
    .bind(player_name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
