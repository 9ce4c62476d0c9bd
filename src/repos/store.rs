/*
 * Responsibility
 * - credential store の読み取りインターフェース (CredentialStore)
 * - handler 用の管理系インターフェース (UserStore)
 * - 両者が返す identity record (UserRecord / Role)
 */
use std::{fmt, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RepoError::UnknownRole(other.to_string())),
        }
    }
}

/// Identity record as owned by the credential store.
///
/// Guards hold a request-scoped copy; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub user_name: String,
    pub role: Role,
    /// Last time the user's credential (password) changed. Tokens issued before this are stale.
    pub credential_changed_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Read side consumed by the auth guards.
///
/// `Ok(None)` means "no such identity"; `Err(_)` is a backend failure.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRecord>>;
}

/// Everything the user handlers need on top of the guard's lookup.
#[async_trait]
pub trait UserStore: CredentialStore {
    async fn list(&self) -> RepoResult<Vec<UserRecord>>;

    // Returns false when the user does not exist.
    async fn deactivate(&self, id: Uuid) -> RepoResult<bool>;

    // Returns false when the user does not exist.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_stored_names() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn role_rejects_unknown_and_differently_cased_names() {
        assert!(matches!(
            "Admin".parse::<Role>(),
            Err(RepoError::UnknownRole(name)) if name == "Admin"
        ));
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::User.to_string(), "user");
    }
}
