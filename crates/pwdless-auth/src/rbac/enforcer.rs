//! Yes/no role enforcement on verified access claims.

use tracing::warn;

use crate::error::AuthError;
use crate::jwt::AccessClaims;

/// Returns `Ok(())` if the claims carry `role`, or `AuthError::Forbidden`.
pub fn require_role(claims: &AccessClaims, role: &str) -> Result<(), AuthError> {
    if claims.has_role(role) {
        Ok(())
    } else {
        warn!(account_id = claims.id, role, "Missing required role");
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles: &[&str]) -> AccessClaims {
        AccessClaims {
            id: 1,
            sub: "Admin".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&claims(&["admin"]), "admin").is_ok());
        assert!(matches!(
            require_role(&claims(&["user"]), "admin"),
            Err(AuthError::Forbidden)
        ));
        assert!(matches!(
            require_role(&claims(&[]), "user"),
            Err(AuthError::Forbidden)
        ));
    }
}
