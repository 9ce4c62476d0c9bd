/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - guard は Db を「認証失敗」ではなくインフラ障害として扱う
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("unknown role stored for user: {0}")]
    UnknownRole(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
