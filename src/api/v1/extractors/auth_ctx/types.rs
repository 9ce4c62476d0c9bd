/*
 * Responsibility
 * - Handler から見える「認証コンテキスト」の型
 * - guard が検証して request extensions に格納し、handler / authorize はこの型だけを読む
 *
 * Notes
 * - 検証ロジックは middleware/services 側の責務
 * - 格納後は読み取り専用 (下流で書き換えない)
 */
use crate::repos::UserRecord;

/// Outcome of a guard run, stored as a request extension.
///
/// `protect` only ever stores `Authenticated`; `optional` stores either.
/// No extension at all means no guard ran for this route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated(UserRecord),
    Anonymous,
}

impl Identity {
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}
