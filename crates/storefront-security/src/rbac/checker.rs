//! RBAC permission checker.

use crate::Claims;
use storefront_core::{StorefrontError, StorefrontResult, UserRole};

/// Extension trait for Claims to check roles.
pub trait ClaimsExt {
    /// Requires at least the given role.
    fn require_role(&self, role: UserRole) -> StorefrontResult<()>;

    /// Requires the caller to manage the catalog.
    fn require_admin(&self) -> StorefrontResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> StorefrontResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(StorefrontError::Forbidden(format!(
                "Required role: {}, your role: {}",
                role, self.role
            )))
        }
    }

    fn require_admin(&self) -> StorefrontResult<()> {
        self.require_role(UserRole::Admin)
    }
}
