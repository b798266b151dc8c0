/*
 * Responsibility
 * - empire 関連の response DTO
 * - gate を通過した後にだけ返すので、所有者名を含めて良い
 */
use serde::Serialize;

use crate::services::directory::{Empire, EmpireType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpireResponse {
    pub name: String,
    pub session_name: String,
    pub player_name: String,
    pub empire_type: EmpireType,
}

impl From<Empire> for EmpireResponse {
    fn from(e: Empire) -> Self {
        Self {
            name: e.name,
            session_name: e.session_name,
            player_name: e.player_name,
            empire_type: e.empire_type,
        }
    }
}
