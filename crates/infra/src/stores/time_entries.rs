//! The append-only clock log.

use std::sync::{Arc, RwLock};

use fichaje_core::{EmployeeId, EntryId, WorkDay};
use fichaje_timeclock::TimeEntry;

use super::StoreError;

/// Persistence boundary for [`TimeEntry`] rows.
///
/// Entries are append-only; the single mutation is `set_validated_by`, the
/// admin re-validation of an existing row. Listings are ordered by timestamp
/// ascending (the order the state machine consumes).
pub trait TimeEntryStore: Send + Sync {
    fn append(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError>;

    fn list_for_employee_on_day(
        &self,
        employee_id: EmployeeId,
        day: WorkDay,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    /// Every employee's entries for a day (admin view).
    fn list_on_day(&self, day: WorkDay) -> Result<Vec<TimeEntry>, StoreError>;

    /// Re-point `validated_by` at a reviewing admin.
    fn set_validated_by(
        &self,
        id: EntryId,
        admin: EmployeeId,
    ) -> Result<TimeEntry, StoreError>;
}

impl<S> TimeEntryStore for Arc<S>
where
    S: TimeEntryStore + ?Sized,
{
    fn append(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        (**self).append(entry)
    }

    fn list_for_employee_on_day(
        &self,
        employee_id: EmployeeId,
        day: WorkDay,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        (**self).list_for_employee_on_day(employee_id, day)
    }

    fn list_on_day(&self, day: WorkDay) -> Result<Vec<TimeEntry>, StoreError> {
        (**self).list_on_day(day)
    }

    fn set_validated_by(
        &self,
        id: EntryId,
        admin: EmployeeId,
    ) -> Result<TimeEntry, StoreError> {
        (**self).set_validated_by(id, admin)
    }
}

/// In-memory clock log for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryTimeEntryStore {
    rows: RwLock<Vec<TimeEntry>>,
}

impl InMemoryTimeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeEntryStore for InMemoryTimeEntryStore {
    fn append(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        rows.push(entry.clone());
        Ok(entry)
    }

    fn list_for_employee_on_day(
        &self,
        employee_id: EmployeeId,
        day: WorkDay,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        let mut out: Vec<_> = rows
            .iter()
            .filter(|e| e.employee_id == employee_id && day.contains(e.timestamp))
            .cloned()
            .collect();
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }

    fn list_on_day(&self, day: WorkDay) -> Result<Vec<TimeEntry>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        let mut out: Vec<_> = rows
            .iter()
            .filter(|e| day.contains(e.timestamp))
            .cloned()
            .collect();
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }

    fn set_validated_by(
        &self,
        id: EntryId,
        admin: EmployeeId,
    ) -> Result<TimeEntry, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        let row = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        row.validated_by = admin;
        Ok(row.clone())
    }
}
