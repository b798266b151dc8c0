/*
 * Responsibility
 * - /sessions/{session_name}/empires/{empire_name} 系 handler
 * - 本体 (GET .../{empire_name}) は route gate (empire access) の内側でのみ呼ばれる
 * - .../access は認証のみのルートで、判定結果 (AuthorizationResult) をそのまま返す
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{dto::empires::EmpireResponse, extractors::AuthCtxExtractor},
    error::AppError,
    services::authz::AuthorizationResult,
    state::AppState,
};

pub async fn get_empire(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path((session_name, empire_name)): Path<(String, String)>,
) -> Result<Json<EmpireResponse>, AppError> {
    let empire = state
        .authz
        .directory()
        .get_empire(&session_name, &empire_name)
        .await?
        .ok_or(AppError::not_found("empire"))?;

    tracing::debug!(username = %ctx.username, "empire overview served");

    Ok(Json(empire.into()))
}

pub async fn check_empire_access(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path((session_name, empire_name)): Path<(String, String)>,
) -> Json<AuthorizationResult> {
    Json(
        state
            .authz
            .can_access_empire(&ctx.username, &session_name, &empire_name)
            .await,
    )
}
