//! Mandatory guard: bearer token 検証 → Identity::Authenticated を extensions に入れる
//!
//! 失敗時はその場で拒否し、下流には進まない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Identity;
use crate::error::AppError;
use crate::services::auth::AuthFailure;
use crate::state::AppState;

/// Wrap every route currently in `router` with the mandatory guard.
///
/// Uses `route_layer`, so routes added afterwards are not covered and unmatched paths still 404.
///
/// ```ignore
/// let private = Router::new().route("/auth/me", get(me));
/// let private = middleware::auth::protect::apply(private, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, protect))
}

pub async fn protect(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = match state.auth.authenticate(req.headers()).await {
        Ok(user) => user,
        Err(failure) => {
            match &failure {
                AuthFailure::Store(err) => {
                    tracing::error!(error = ?err, "credential store lookup failed");
                }
                other => {
                    tracing::warn!(reason = %other, "request rejected by auth guard");
                }
            }
            return Err(failure.into());
        }
    };

    tracing::debug!(user_id = %user.id, role = %user.role, "request authenticated");

    // middleware → extractor / authorize への受け渡し
    req.extensions_mut().insert(Identity::Authenticated(user));

    Ok(next.run(req).await)
}
