//! Role authorizer. Must sit inside `protect`.

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
use crate::repos::Role;
use crate::state::AppState;

/// Roles allowed through, fixed when the route is registered.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(&'static [Role]);

impl AllowedRoles {
    pub fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn permits(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Restrict every route currently in `router` to `roles`.
///
/// Apply this before `protect::apply` so that `protect` ends up as the outer layer.
pub fn apply(router: Router<AppState>, roles: &'static [Role]) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        AllowedRoles::new(roles),
        authorize,
    ))
}

pub async fn authorize(
    State(allowed): State<AllowedRoles>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (user_id, role) = match req.extensions().get::<Identity>() {
        Some(Identity::Authenticated(user)) => (user.id, user.role),
        // Composition error: no identity was attached upstream. Fail closed.
        Some(Identity::Anonymous) | None => {
            tracing::error!("role check reached without an authenticated identity");
            return Err(AppError::Unauthenticated);
        }
    };

    if !allowed.permits(role) {
        tracing::warn!(user_id = %user_id, role = %role, "role not permitted for route");
        return Err(AppError::Forbidden { role });
    }

    Ok(next.run(req).await)
}
