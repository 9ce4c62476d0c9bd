/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - guard が格納した Identity を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Identity
 * - CurrentUser / MaybeUser
 */

mod core;
mod types;

pub use core::{CurrentUser, MaybeUser};
pub use types::Identity;
