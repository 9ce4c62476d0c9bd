/*
 * Responsibility
 * - Users の response DTO
 * - credential_changed_at などの内部情報は返さない
 */
use serde::Serialize;
use uuid::Uuid;

use crate::repos::{Role, UserRecord};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub authenticated: bool,
}
