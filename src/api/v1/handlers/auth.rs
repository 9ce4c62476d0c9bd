/*
 * Responsibility
 * - GET /auth/me (protect 配下)
 */
use axum::Json;

use crate::api::v1::{dto::users::UserResponse, extractors::CurrentUser};

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
