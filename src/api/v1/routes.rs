/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - どの route にどの guard を掛けるかはここで決める
 *   - public: guard なし
 *   - personalised: optional
 *   - private: protect (admin 系はさらに authorize)
 */
use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::v1::handlers::{
    auth::me,
    health::health,
    users::{deactivate_profile, delete_profile, get_profile, get_user, list_users},
    welcome::welcome,
};
use crate::middleware::auth::{authorize, optional, protect};
use crate::repos::Role;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let personalised = Router::new().route("/welcome", get(welcome));
    let personalised = optional::apply(personalised, state.clone());

    let admin = Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user));
    // authorize first, then protect wraps it from the outside
    let admin = authorize::apply(admin, &[Role::Admin]);

    let private = Router::new()
        .route("/auth/me", get(me))
        .route("/users/profile", get(get_profile).delete(delete_profile))
        .route("/users/profile/deactivate", patch(deactivate_profile))
        .merge(admin);
    let private = protect::apply(private, state);

    public.merge(personalised).merge(private)
}
