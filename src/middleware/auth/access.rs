//! Route gate: identity check → (empire authorization) → handler / login prompt / redirect
//!
//! - 各リクエストで identity を 1 回だけ取得し、RouteGuard に渡す
//! - empire access が必要なルートでは AuthorizationWatch に session/empire を渡して判定を待つ
//! - static page / 認証のみのルートでは、authorization params を両方 None で渡す (lookup しない)
//! - 401 / redirect のレスポンスには session/empire 名を一切含めない

use std::sync::Arc;

use axum::{
    RequestExt, Router,
    body::Body,
    extract::{RawPathParams, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::auth::guard::{
    GuardState, GuardView, RouteAccess, RouteGuard, RouteParams,
};
use crate::services::authz::{AuthorizationService, AuthorizationWatch};
use crate::services::identity::{BearerIdentity, IdentityProvider, resolve_principal};
use crate::state::AppState;

#[derive(Clone, Debug)]
struct GateState {
    app: AppState,
    access: RouteAccess,
}

/// ルート群に gate を掛ける。
///
/// 例：
/// ```ignore
/// let empires = Router::new().route("/sessions/{session_name}/empires/{empire_name}", get(get_empire));
/// let empires = middleware::auth::access::protect(empires, state.clone(), RouteAccess::empire());
/// ```
pub fn protect(router: Router<AppState>, state: AppState, access: RouteAccess) -> Router<AppState> {
    // route_layer: マッチしたルートにだけ適用し、path params を読めるようにする
    router.route_layer(middleware::from_fn_with_state(
        GateState { app: state, access },
        gate_middleware,
    ))
}

async fn gate_middleware(
    State(gate): State<GateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let params = route_params(&mut req).await;

    let identity: Arc<dyn IdentityProvider> = Arc::new(BearerIdentity::from_headers(
        gate.app.verifier.clone(),
        req.headers(),
    ));

    let guard = drive(gate.access, gate.app.authz.clone(), identity, &params).await;

    match guard.view() {
        GuardView::Children => {
            if let Some(principal) = guard.principal() {
                req.extensions_mut().insert(AuthCtx::from(principal));
            }
            next.run(req).await
        }
        GuardView::LoginPrompt => AppError::Unauthorized.into_response(),
        GuardView::Redirect(location) => {
            tracing::info!(state = ?guard.state(), "empire access denied");
            Redirect::to(&location).into_response()
        }
        GuardView::Loading(_) => {
            // drive() only returns terminal states
            tracing::error!(state = ?guard.state(), "route gate finished without a verdict");
            AppError::Internal.into_response()
        }
    }
}

/// Run the guard to a terminal state for one request.
pub async fn drive(
    access: RouteAccess,
    authz: Arc<AuthorizationService>,
    identity: Arc<dyn IdentityProvider>,
    params: &RouteParams,
) -> RouteGuard {
    let mut guard = RouteGuard::new(access);

    guard.on_identity(resolve_principal(identity.as_ref()).await);
    if *guard.state() != GuardState::Authenticated {
        return guard;
    }

    let mut watch = AuthorizationWatch::new(authz, identity);
    let (session_name, empire_name) = guard.authorization_params(params);
    watch.set_params(session_name, empire_name);

    if guard.needs_authorization() {
        guard.on_authorization(&watch.state());
        let settled = watch.settled().await;
        guard.on_authorization(&settled);
    }

    guard
}

async fn route_params(req: &mut Request<Body>) -> RouteParams {
    let Ok(raw) = req.extract_parts::<RawPathParams>().await else {
        return RouteParams::default();
    };

    let mut params = RouteParams::default();
    for (key, value) in raw.iter() {
        match key {
            "session_name" => params.session_name = Some(value.to_string()),
            "empire_name" => params.empire_name = Some(value.to_string()),
            _ => {}
        }
    }
    params
}
