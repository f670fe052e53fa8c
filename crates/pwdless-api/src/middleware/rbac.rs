//! Role guards for handlers.

use pwdless_auth::require_role;

use crate::error::ApiError;
use crate::extractors::AccessAuth;

/// Role required by the `/admin` routes.
pub const ADMIN_ROLE: &str = "admin";

/// Checks that the authenticated account has the admin role.
pub fn require_admin(auth: &AccessAuth) -> Result<(), ApiError> {
    require_role(&auth.0, ADMIN_ROLE)?;
    Ok(())
}
