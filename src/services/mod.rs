pub(crate) mod idea_service;
pub(crate) mod instrument_service;
pub(crate) mod portfolio_service;
pub(crate) mod user_service;

use crate::errors::AppError;

/// Destructive requests must restate the identifier they target; a missing
/// or mismatched confirmation rejects before anything is deleted.
pub(crate) fn confirm_matches<T: PartialEq>(
    target: T,
    confirm: Option<T>,
    field: &str,
) -> Result<(), AppError> {
    if confirm != Some(target) {
        return Err(AppError::Validation(format!(
            "{field} confirmation does not match"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_confirm_matches_accepts_matching_id() {
        let id = Uuid::new_v4();
        assert!(confirm_matches(id, Some(id), "idea_id").is_ok());
        assert!(confirm_matches("alice", Some("alice"), "username").is_ok());
    }

    #[test]
    fn test_confirm_missing_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(
            confirm_matches(id, None, "idea_id"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_confirm_mismatch_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(
            confirm_matches(id, Some(Uuid::new_v4()), "portfolio_id"),
            Err(AppError::Validation(_))
        ));
        assert!(confirm_matches("alice", Some("bob"), "username").is_err());
    }
}
