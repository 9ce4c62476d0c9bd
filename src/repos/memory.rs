//! In-process credential store.
//!
//! Backs the integration tests and local runs without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{CredentialStore, UserRecord, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> RepoResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(users)
    }

    async fn deactivate(&self, id: Uuid) -> RepoResult<bool> {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
