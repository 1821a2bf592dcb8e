//! The employee directory table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use fichaje_core::EmployeeId;
use fichaje_employees::Employee;

use super::StoreError;

pub trait EmployeeStore: Send + Sync {
    /// Insert or replace a directory row.
    fn upsert(&self, employee: Employee) -> Result<Employee, StoreError>;

    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    fn list(&self) -> Result<Vec<Employee>, StoreError>;
}

impl<S> EmployeeStore for Arc<S>
where
    S: EmployeeStore + ?Sized,
{
    fn upsert(&self, employee: Employee) -> Result<Employee, StoreError> {
        (**self).upsert(employee)
    }

    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Employee>, StoreError> {
        (**self).list()
    }
}

/// In-memory directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    rows: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn upsert(&self, employee: Employee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        let mut out: Vec<_> = rows.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use fichaje_auth::Role;

    use super::*;

    #[test]
    fn upsert_then_get_roundtrips() {
        let store = InMemoryEmployeeStore::new();
        let id = EmployeeId::new();
        let employee = Employee::provision_default(id, "ana@example.com", Role::Employee);

        store.upsert(employee.clone()).unwrap();
        assert_eq!(store.get(id).unwrap(), Some(employee));
        assert_eq!(store.get(EmployeeId::new()).unwrap(), None);
    }

    #[test]
    fn list_is_sorted_by_name() {
        let store = InMemoryEmployeeStore::new();
        for email in ["zoe@example.com", "ana@example.com"] {
            store
                .upsert(Employee::provision_default(
                    EmployeeId::new(),
                    email,
                    Role::Employee,
                ))
                .unwrap();
        }

        let names: Vec<_> = store.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["ana", "zoe"]);
    }
}
