use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::repos::UserRecord;

use super::Identity;

/// Handler で認証済みユーザーを受け取るための extractor
/// `protect` が Identity を request.extensions() に insert 済みである前提
/// 見つからない / Anonymous の場合は 401 を返す（ミドルウェア未設定）
pub struct CurrentUser(pub UserRecord);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Authenticated(user)) => Ok(CurrentUser(user.clone())),
            Some(Identity::Anonymous) | None => {
                tracing::error!("CurrentUser extracted on a route without the protect guard");
                Err(AppError::Unauthenticated)
            }
        }
    }
}

/// `optional` guard 配下の handler 用。拒否しない。
pub struct MaybeUser(pub Option<UserRecord>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<Identity>()
            .and_then(Identity::user)
            .cloned();

        Ok(MaybeUser(user))
    }
}
