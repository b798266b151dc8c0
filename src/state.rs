/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - authz: AuthorizationService (empire directory を内包), verifier: identity token 検証
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - プロセス全体の singleton は持たない。app.rs で組み立てて注入する
 */
use std::sync::Arc;

use crate::services::{authz::AuthorizationService, identity::TokenVerifier};

#[derive(Clone, Debug)]
pub struct AppState {
    pub authz: Arc<AuthorizationService>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(authz: Arc<AuthorizationService>, verifier: Arc<TokenVerifier>) -> Self {
        Self { authz, verifier }
    }
}
