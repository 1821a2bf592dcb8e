//! Employee directory records.

use serde::{Deserialize, Serialize};

use fichaje_auth::Role;
use fichaje_core::EmployeeId;

/// A directory entry for one person.
///
/// The id doubles as the authenticated subject id, so the directory row for
/// a principal is always `get(principal.employee_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub dni: String,
    pub email: String,
    pub role: Role,
    pub department: String,
}

impl Employee {
    /// The placeholder profile created on first authenticated contact, when
    /// no directory row exists yet. Defaults match the rows the legacy app
    /// provisioned: name from the email local part, unset DNI, the General
    /// department.
    pub fn provision_default(id: EmployeeId, email: &str, role: Role) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id,
            name,
            dni: "NO DEFINIDO".to_string(),
            email: email.to_string(),
            role,
            department: "General".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioned_profile_uses_email_local_part() {
        let id = EmployeeId::new();
        let employee = Employee::provision_default(id, "ana.perez@example.com", Role::Employee);

        assert_eq!(employee.name, "ana.perez");
        assert_eq!(employee.dni, "NO DEFINIDO");
        assert_eq!(employee.department, "General");
        assert_eq!(employee.role, Role::Employee);
    }

    #[test]
    fn malformed_email_falls_back_to_whole_string() {
        let employee = Employee::provision_default(EmployeeId::new(), "no-at-sign", Role::Admin);
        assert_eq!(employee.name, "no-at-sign");
    }
}
