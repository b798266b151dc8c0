/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - ルートごとに gate の種類 (static page / 認証のみ / empire access) を決める
 * - gate の外に置くのは /health, /login, /unauthorized だけ
 */
use axum::{Router, routing::get};

use crate::middleware::auth::{RouteAccess, protect};
use crate::state::AppState;

use crate::api::v1::handlers::{
    empires::{check_empire_access, get_empire},
    health::health,
    me::me,
    pages::{help, login, unauthorized},
};

/// `/api/v1` 配下
pub fn routes(state: AppState) -> Router<AppState> {
    let static_pages = protect(
        Router::new().route("/help", get(help)),
        state.clone(),
        RouteAccess::static_page(),
    );

    let authenticated = protect(
        Router::new().route("/me", get(me)).route(
            "/sessions/{session_name}/empires/{empire_name}/access",
            get(check_empire_access),
        ),
        state.clone(),
        RouteAccess::authenticated(),
    );

    let empires = protect(
        Router::new().route(
            "/sessions/{session_name}/empires/{empire_name}",
            get(get_empire),
        ),
        state,
        RouteAccess::empire(),
    );

    Router::new()
        .merge(static_pages)
        .merge(authenticated)
        .merge(empires)
}

/// ルート直下の public ページ
pub fn pages() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", get(login))
        .route("/unauthorized", get(unauthorized))
}
