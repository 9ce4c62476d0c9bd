use std::{sync::Arc, time::Duration};

use axum::http::HeaderMap;
use thiserror::Error;

use crate::repos::{CredentialStore, RepoError, UserRecord};
use crate::services::auth::bearer::extract_bearer;
use crate::services::auth::eligibility::{Ineligible, check_eligibility};
use crate::services::auth::token::{Claims, TokenCodec, TokenError};

/// Every way the extract → verify → resolve → eligibility pipeline can stop.
///
/// Guards match on this exhaustively; the optional guard folds all of it into "anonymous".
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("no bearer token")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token subject does not resolve to a user")]
    IdentityNotFound,
    #[error("credential store lookup timed out")]
    LookupTimedOut,
    #[error("credential store failure: {0}")]
    Store(#[from] RepoError),
    #[error(transparent)]
    Ineligible(#[from] Ineligible),
}

/// Request authentication shared by the mandatory and optional guards.
///
/// Holds only read-only dependencies; one instance serves every request.
#[derive(Clone)]
pub struct AuthService {
    codec: TokenCodec,
    users: Arc<dyn CredentialStore>,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("codec", &self.codec)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        codec: TokenCodec,
        users: Arc<dyn CredentialStore>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            codec,
            users,
            lookup_timeout,
        }
    }

    /// Run the whole pipeline against request headers.
    ///
    /// Returns the identity record exactly as the store produced it.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<UserRecord, AuthFailure> {
        let token = extract_bearer(headers).ok_or(AuthFailure::MissingToken)?;
        let claims = self.codec.verify(token)?;
        let user = self.resolve(&claims).await?;
        check_eligibility(&user, claims.issued_at)?;

        Ok(user)
    }

    /// Look up the claims' subject, bounded by the configured lookup timeout.
    pub async fn resolve(&self, claims: &Claims) -> Result<UserRecord, AuthFailure> {
        let lookup = self.users.find_by_id(claims.subject_id);

        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Err(_elapsed) => Err(AuthFailure::LookupTimedOut),
            Ok(Err(e)) => Err(AuthFailure::Store(e)),
            Ok(Ok(None)) => Err(AuthFailure::IdentityNotFound),
            Ok(Ok(Some(user))) => Ok(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{InMemoryUserStore, RepoResult, Role};
    use async_trait::async_trait;
    use axum::http::{HeaderValue, header};
    use chrono::{Duration as ChronoDuration, Utc};
    use uuid::Uuid;

    struct SlowStore;

    #[async_trait]
    impl CredentialStore for SlowStore {
        async fn find_by_id(&self, _id: Uuid) -> RepoResult<Option<UserRecord>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn find_by_id(&self, _id: Uuid) -> RepoResult<Option<UserRecord>> {
            Err(RepoError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(b"guard-test-secret", 0)
    }

    fn active_user() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            user_name: "dave".to_string(),
            role: Role::User,
            credential_changed_at: None,
            is_active: true,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn service(users: Arc<dyn CredentialStore>, timeout: Duration) -> AuthService {
        AuthService::new(codec(), users, timeout)
    }

    #[tokio::test]
    async fn authenticates_active_user() {
        let user = active_user();
        let store = Arc::new(InMemoryUserStore::with_users([user.clone()]));
        let auth = service(store, Duration::from_secs(1));
        let token = codec()
            .sign(user.id, Utc::now(), ChronoDuration::hours(1))
            .unwrap();

        assert_eq!(auth.authenticate(&bearer(&token)).await.unwrap(), user);
    }

    #[tokio::test]
    async fn missing_header_is_missing_token() {
        let auth = service(Arc::new(InMemoryUserStore::new()), Duration::from_secs(1));

        assert!(matches!(
            auth.authenticate(&HeaderMap::new()).await,
            Err(AuthFailure::MissingToken)
        ));
    }

    #[tokio::test]
    async fn unknown_subject_is_identity_not_found() {
        let auth = service(Arc::new(InMemoryUserStore::new()), Duration::from_secs(1));
        let token = codec()
            .sign(Uuid::new_v4(), Utc::now(), ChronoDuration::hours(1))
            .unwrap();

        assert!(matches!(
            auth.authenticate(&bearer(&token)).await,
            Err(AuthFailure::IdentityNotFound)
        ));
    }

    #[tokio::test]
    async fn slow_lookup_times_out() {
        let auth = service(Arc::new(SlowStore), Duration::from_millis(20));
        let token = codec()
            .sign(Uuid::new_v4(), Utc::now(), ChronoDuration::hours(1))
            .unwrap();

        assert!(matches!(
            auth.authenticate(&bearer(&token)).await,
            Err(AuthFailure::LookupTimedOut)
        ));
    }

    #[tokio::test]
    async fn store_failure_is_kept_distinct() {
        let auth = service(Arc::new(BrokenStore), Duration::from_secs(1));
        let token = codec()
            .sign(Uuid::new_v4(), Utc::now(), ChronoDuration::hours(1))
            .unwrap();

        assert!(matches!(
            auth.authenticate(&bearer(&token)).await,
            Err(AuthFailure::Store(RepoError::Db(_)))
        ));
    }

    #[tokio::test]
    async fn verification_runs_before_lookup() {
        // BrokenStore would fail the lookup; an expired token must stop earlier.
        let auth = service(Arc::new(BrokenStore), Duration::from_secs(1));
        let token = codec()
            .sign(
                Uuid::new_v4(),
                Utc::now() - ChronoDuration::hours(3),
                ChronoDuration::hours(1),
            )
            .unwrap();

        assert!(matches!(
            auth.authenticate(&bearer(&token)).await,
            Err(AuthFailure::Token(TokenError::Expired))
        ));
    }
}
