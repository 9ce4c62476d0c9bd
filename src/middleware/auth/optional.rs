//! Optional guard: 同じ pipeline を通すが、失敗しても拒否しない。
//!
//! 成功時だけ Identity::Authenticated、それ以外は Identity::Anonymous を extensions に入れる。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Identity;
use crate::services::auth::AuthFailure;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, optional))
}

pub async fn optional(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = match state.auth.authenticate(req.headers()).await {
        Ok(user) => Identity::Authenticated(user),
        Err(AuthFailure::MissingToken) => Identity::Anonymous,
        Err(failure) => {
            tracing::debug!(reason = %failure, "continuing without identity");
            Identity::Anonymous
        }
    };

    req.extensions_mut().insert(identity);

    next.run(req).await
}
