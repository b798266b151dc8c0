/*
 * Responsibility
 * - GET /unauthorized?reason=..  (public) 拒否理由ごとの固定メッセージ
 * - GET /login                   (public) 未認証時の案内。実際のログインは identity provider の責務
 * - GET /help                    (static page) 認証のみ、empire の認可はしない
 */
use axum::{Json, extract::Query, http::StatusCode};

use crate::api::v1::dto::pages::{HelpResponse, HelpSection, NoticeResponse, UnauthorizedQuery};
use crate::services::authz::DenialReason;

pub async fn unauthorized(
    Query(query): Query<UnauthorizedQuery>,
) -> (StatusCode, Json<NoticeResponse>) {
    let reason = query
        .reason
        .as_deref()
        .and_then(|r| r.parse::<DenialReason>().ok());

    // unknown / missing reason → generic "no permission"
    let message = reason.unwrap_or(DenialReason::NotOwner).message();

    (StatusCode::FORBIDDEN, Json(NoticeResponse { reason, message }))
}

pub async fn login() -> (StatusCode, Json<NoticeResponse>) {
    let reason = DenialReason::NotAuthenticated;
    (
        StatusCode::UNAUTHORIZED,
        Json(NoticeResponse {
            reason: Some(reason),
            message: reason.message(),
        }),
    )
}

const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Empires",
        body: "Each player runs one empire per session. You can open the empires you own.",
    },
    HelpSection {
        title: "Game Masters",
        body: "The player running a session's GM empire can open every empire of that session.",
    },
    HelpSection {
        title: "Access denied",
        body: "If an empire cannot be opened you are sent to a page explaining why.",
    },
];

pub async fn help() -> Json<HelpResponse> {
    Json(HelpResponse {
        title: "Help",
        sections: HELP_SECTIONS,
    })
}
