/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - route gate が判定して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token 検証や empire 所有者チェックは middleware/services 側の責務
 */
use crate::services::identity::Principal;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `username` は identity provider が返す安定したハンドル
/// - `groups` は coarse-grained なロール (ex: "GAMEMASTERS")。empire ごとの認可には使わない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub username: String,
    pub groups: Vec<String>,
}

impl From<&Principal> for AuthCtx {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username().to_string(),
            groups: principal.groups().map(str::to_string).collect(),
        }
    }
}
