use fichaje_auth::Role;
use fichaje_core::EmployeeId;

/// Principal context for a request (authenticated identity + role).
///
/// This is immutable and must be present for all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    employee_id: EmployeeId,
    email: String,
    role: Role,
}

impl PrincipalContext {
    pub fn new(employee_id: EmployeeId, email: String, role: Role) -> Self {
        Self {
            employee_id,
            email,
            role,
        }
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
