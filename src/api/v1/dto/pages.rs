/*
 * Responsibility
 * - /unauthorized, /login, /help の response DTO
 * - 固定文言と reason code 以外は持たない
 */
use serde::{Deserialize, Serialize};

use crate::services::authz::DenialReason;

#[derive(Debug, Deserialize)]
pub struct UnauthorizedQuery {
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HelpSection {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub title: &'static str,
    pub sections: &'static [HelpSection],
}
