use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::repos::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligible {
    #[error("token predates the last credential change")]
    StaleCredential,
    #[error("account is deactivated")]
    AccountDeactivated,
}

/// Decide whether `user` may act on a token issued at `issued_at`.
///
/// Staleness is checked before active status, so an identity that is both stale and
/// deactivated always reports `StaleCredential`. Token `iat` has second precision, so the
/// change time is truncated to whole seconds before comparing.
pub fn check_eligibility(user: &UserRecord, issued_at: DateTime<Utc>) -> Result<(), Ineligible> {
    if let Some(changed_at) = user.credential_changed_at
        && changed_at.timestamp() > issued_at.timestamp()
    {
        return Err(Ineligible::StaleCredential);
    }

    if !user.is_active {
        return Err(Ineligible::AccountDeactivated);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::Role;
    use chrono::Duration;
    use uuid::Uuid;

    fn user(changed_at: Option<DateTime<Utc>>, is_active: bool) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            user_name: "carol".to_string(),
            role: Role::User,
            credential_changed_at: changed_at,
            is_active,
        }
    }

    #[test]
    fn active_user_without_credential_change_is_eligible() {
        assert_eq!(check_eligibility(&user(None, true), Utc::now()), Ok(()));
    }

    #[test]
    fn change_before_issue_is_eligible() {
        let issued_at = Utc::now();
        let changed = Some(issued_at - Duration::minutes(5));
        assert_eq!(check_eligibility(&user(changed, true), issued_at), Ok(()));
    }

    #[test]
    fn change_after_issue_is_stale() {
        let issued_at = Utc::now() - Duration::minutes(10);
        let changed = Some(issued_at + Duration::minutes(1));
        assert_eq!(
            check_eligibility(&user(changed, true), issued_at),
            Err(Ineligible::StaleCredential)
        );
    }

    #[test]
    fn change_within_the_issue_second_is_not_stale() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let changed = Some(issued_at + Duration::milliseconds(900));
        assert_eq!(check_eligibility(&user(changed, true), issued_at), Ok(()));
    }

    #[test]
    fn inactive_user_is_deactivated() {
        assert_eq!(
            check_eligibility(&user(None, false), Utc::now()),
            Err(Ineligible::AccountDeactivated)
        );
    }

    #[test]
    fn staleness_wins_over_deactivation() {
        let issued_at = Utc::now() - Duration::minutes(10);
        let changed = Some(Utc::now());
        assert_eq!(
            check_eligibility(&user(changed, false), issued_at),
            Err(Ineligible::StaleCredential)
        );
    }
}
