/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: guard が使う AuthService, users: handler が使う UserStore
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::repos::UserStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, users: Arc<dyn UserStore>) -> Self {
        Self { auth, users }
    }
}
