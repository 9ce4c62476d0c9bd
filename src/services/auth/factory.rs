/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::CredentialStore;
use crate::services::auth::{AuthService, TokenCodec};

pub fn build_auth_service(config: &Config, users: Arc<dyn CredentialStore>) -> Arc<AuthService> {
    let codec = TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.access_token_leeway_seconds,
    );

    Arc::new(AuthService::new(codec, users, config.auth_lookup_timeout))
}
