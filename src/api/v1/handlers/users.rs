/*
 * Responsibility
 * - /users 系 handler
 * - profile 系は protect 配下 (CurrentUser を受け取る)
 * - 一覧 / 個別取得は protect + authorize(admin) 配下
 */
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{dto::users::UserResponse, extractors::CurrentUser},
    error::AppError,
    state::AppState,
};

pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Deactivate the caller's own account. Tokens already issued stop working on the next request.
pub async fn deactivate_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    let deactivated = state.users.deactivate(user.id).await?;

    if deactivated {
        tracing::info!(user_id = %user.id, "account deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}

/// Delete the caller's own account. Outstanding tokens no longer resolve to an identity.
pub async fn delete_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    if state.users.delete(user.id).await? {
        tracing::info!(user_id = %user.id, "account deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(user_id) = user_id?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(user.into()))
}
