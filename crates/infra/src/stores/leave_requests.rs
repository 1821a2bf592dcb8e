//! Leave request rows.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use fichaje_core::{EmployeeId, LeaveRequestId};
use fichaje_leave::{LeaveDecision, LeaveRequest};

use super::StoreError;

pub trait LeaveRequestStore: Send + Sync {
    fn create(&self, request: LeaveRequest) -> Result<LeaveRequest, StoreError>;

    fn get(&self, id: LeaveRequestId) -> Result<Option<LeaveRequest>, StoreError>;

    /// One employee's requests, newest first.
    fn list_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, StoreError>;

    /// Every request, newest first (admin view).
    fn list_all(&self) -> Result<Vec<LeaveRequest>, StoreError>;

    /// Apply an admin decision to a pending request, atomically.
    ///
    /// [`StoreError::Conflict`] if the request was already decided (two
    /// admins racing resolve to one winner), [`StoreError::NotFound`] if the
    /// row does not exist.
    fn decide(
        &self,
        id: LeaveRequestId,
        decision: LeaveDecision,
        admin: EmployeeId,
    ) -> Result<LeaveRequest, StoreError>;
}

impl<S> LeaveRequestStore for Arc<S>
where
    S: LeaveRequestStore + ?Sized,
{
    fn create(&self, request: LeaveRequest) -> Result<LeaveRequest, StoreError> {
        (**self).create(request)
    }

    fn get(&self, id: LeaveRequestId) -> Result<Option<LeaveRequest>, StoreError> {
        (**self).get(id)
    }

    fn list_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        (**self).list_for_employee(employee_id)
    }

    fn list_all(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        (**self).list_all()
    }

    fn decide(
        &self,
        id: LeaveRequestId,
        decision: LeaveDecision,
        admin: EmployeeId,
    ) -> Result<LeaveRequest, StoreError> {
        (**self).decide(id, decision, admin)
    }
}

/// In-memory request table for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLeaveRequestStore {
    rows: RwLock<HashMap<LeaveRequestId, LeaveRequest>>,
}

impl InMemoryLeaveRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(mut rows: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

impl LeaveRequestStore for InMemoryLeaveRequestStore {
    fn create(&self, request: LeaveRequest) -> Result<LeaveRequest, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        rows.insert(request.id, request.clone());
        Ok(request)
    }

    fn get(&self, id: LeaveRequestId) -> Result<Option<LeaveRequest>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    fn list_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        Ok(Self::sorted_newest_first(
            rows.values()
                .filter(|r| r.employee_id == employee_id)
                .cloned()
                .collect(),
        ))
    }

    fn list_all(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        Ok(Self::sorted_newest_first(rows.values().cloned().collect()))
    }

    fn decide(
        &self,
        id: LeaveRequestId,
        decision: LeaveDecision,
        admin: EmployeeId,
    ) -> Result<LeaveRequest, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.decide(decision, admin)
            .map_err(|_| StoreError::Conflict)?;
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use fichaje_leave::{LeaveStatus, LeaveType};

    use super::*;

    fn employee(n: u128) -> EmployeeId {
        EmployeeId::from_uuid(uuid::Uuid::from_u128(n))
    }

    fn request_at(store: &InMemoryLeaveRequestStore, who: EmployeeId, hour: u32) -> LeaveRequest {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap();
        let request = LeaveRequest::submit(
            who,
            LeaveType::Personal,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
            "",
            created,
        )
        .unwrap();
        store.create(request).unwrap()
    }

    #[test]
    fn listings_are_newest_first_and_scoped() {
        let store = InMemoryLeaveRequestStore::new();
        let ana = employee(1);
        let ben = employee(2);

        let older = request_at(&store, ana, 8);
        let newer = request_at(&store, ana, 12);
        request_at(&store, ben, 10);

        let mine = store.list_for_employee(ana).unwrap();
        assert_eq!(
            mine.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
        assert_eq!(store.list_all().unwrap().len(), 3);
    }

    #[test]
    fn decide_is_single_shot() {
        let store = InMemoryLeaveRequestStore::new();
        let request = request_at(&store, employee(1), 8);
        let admin = employee(0xAD);

        let decided = store
            .decide(request.id, LeaveDecision::Approve, admin)
            .unwrap();
        assert_eq!(decided.status, LeaveStatus::Approved);
        assert_eq!(decided.approved_by, Some(admin));

        assert_eq!(
            store.decide(request.id, LeaveDecision::Reject, admin),
            Err(StoreError::Conflict)
        );
        assert_eq!(
            store.get(request.id).unwrap().unwrap().status,
            LeaveStatus::Approved
        );
    }

    #[test]
    fn decide_missing_row_is_not_found() {
        let store = InMemoryLeaveRequestStore::new();
        assert_eq!(
            store.decide(LeaveRequestId::new(), LeaveDecision::Approve, employee(1)),
            Err(StoreError::NotFound)
        );
    }
}
