/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (credential store の Postgres 実装)
 * - PgPool を受け取り UserStore を提供
 * - role 文字列は UserRecord へ変換する時点で検証する
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::{CredentialStore, UserRecord, UserStore};

#[derive(Debug, FromRow)]
struct UserRow {
    #[sqlx(rename = "userId")]
    id: Uuid,
    #[sqlx(rename = "userName")]
    user_name: String,
    role: String,
    #[sqlx(rename = "passwordChangedAt")]
    password_changed_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "isActive")]
    is_active: bool,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepoError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            user_name: row.user_name,
            role: row.role.parse()?,
            credential_changed_at: row.password_changed_at,
            is_active: row.is_active,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "userName", role, "passwordChangedAt", "isActive"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> RepoResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "userName", role, "passwordChangedAt", "isActive"
            FROM users
            ORDER BY "createdAt" DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn deactivate(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET "isActive" = false
            WHERE "userId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
