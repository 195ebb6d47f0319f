use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Authorization gate for admin-only operations. Assumes authentication has
/// already run; never mutates anything.
pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if !claims.is_admin {
        return Err(AppError::Forbidden("Admin access only".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(username: &str, is_admin: bool) -> Claims {
        Claims {
            sub: format!("{}-id", username),
            username: username.to_string(),
            is_admin,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_require_admin_success() {
        let claims = create_test_claims("admin", true);
        assert!(require_admin(&claims).is_ok());
    }

    #[test]
    fn test_require_admin_failure() {
        let claims = create_test_claims("user", false);

        let err = require_admin(&claims).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
