/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthFailure / RepoError を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::{RepoError, Role};
use crate::services::auth::{AuthFailure, Ineligible, TokenError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// The `Display` text of each variant is the client-facing message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("You are not logged in. Please log in to get access.")]
    NotLoggedIn,
    #[error("Not authorized to access this route.")]
    Unauthenticated,
    #[error("Invalid token. Please log in again.")]
    InvalidToken,
    #[error("Token expired. Please log in again.")]
    TokenExpired,
    #[error("User recently changed password! Please log in again.")]
    StaleCredential,
    #[error("Account is deactivated. Please contact support.")]
    AccountDeactivated,
    #[error("User role '{role}' is not authorized to access this route.")]
    Forbidden { role: Role },
    #[error("Invalid request path.")]
    InvalidPath,
    #[error("{resource} not found.")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotLoggedIn
            | AppError::Unauthenticated
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::StaleCredential
            | AppError::AccountDeactivated => StatusCode::UNAUTHORIZED,
            AppError::InvalidPath => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error",
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingToken => AppError::NotLoggedIn,
            AuthFailure::Token(TokenError::InvalidSignature) => AppError::InvalidToken,
            AuthFailure::Token(TokenError::Expired) => AppError::TokenExpired,
            AuthFailure::Token(TokenError::Unverifiable) => AppError::Unauthenticated,
            // Not distinguished from other failures: callers must not learn which ids exist.
            AuthFailure::IdentityNotFound | AuthFailure::LookupTimedOut => {
                AppError::Unauthenticated
            }
            AuthFailure::Store(_) => AppError::Internal,
            AuthFailure::Ineligible(Ineligible::StaleCredential) => AppError::StaleCredential,
            AuthFailure::Ineligible(Ineligible::AccountDeactivated) => {
                AppError::AccountDeactivated
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(_) | RepoError::UnknownRole(_) => AppError::Internal,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "path parameter rejected");
        AppError::InvalidPath
    }
}
