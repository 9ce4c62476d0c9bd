/*
 * Responsibility
 * - GET /welcome (optional 配下)
 * - identity があれば挨拶を個別化、なければ guest 扱い
 */
use axum::Json;

use crate::api::v1::{dto::users::WelcomeResponse, extractors::MaybeUser};

pub async fn welcome(MaybeUser(user): MaybeUser) -> Json<WelcomeResponse> {
    let res = match user {
        Some(user) => WelcomeResponse {
            message: format!("Welcome back, {}!", user.user_name),
            authenticated: true,
        },
        None => WelcomeResponse {
            message: "Welcome, guest!".to_string(),
            authenticated: false,
        },
    };

    Json(res)
}
