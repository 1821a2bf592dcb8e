//! Role-based authorization checks.

use thiserror::Error;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("administrator role required")]
    AdminRequired,
}

/// Gate for admin-only operations (code issuance, aggregate stats, leave
/// decisions, entry re-validation).
pub fn require_admin(role: Role) -> Result<(), AuthzError> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::AdminRequired)
    }
}
