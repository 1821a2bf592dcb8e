//! Daily code rows and their single-use consumption.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use fichaje_codes::DailyCode;
use fichaje_core::{CodeId, WorkDay};

use super::StoreError;

/// Persistence boundary for [`DailyCode`] rows.
///
/// `mark_used` is the conditional update the whole gate leans on: it
/// succeeds only if `used` was still false, and concurrent consumers of the
/// same code must observe exactly one success. An in-process mutex is not
/// what provides this in production - submitters run in independent
/// processes - so real backends implement it as a compare-and-swap write or
/// a transaction.
pub trait DailyCodeStore: Send + Sync {
    fn create(&self, code: DailyCode) -> Result<DailyCode, StoreError>;

    /// All codes created for a day, used or not, creation order not
    /// guaranteed. Selection (active code, text matching) is done by the
    /// caller with the pure helpers in `fichaje-codes`.
    fn list_for_day(&self, day: WorkDay) -> Result<Vec<DailyCode>, StoreError>;

    /// Flip `used` false→true. [`StoreError::Conflict`] if it was already
    /// true; [`StoreError::NotFound`] if the row vanished.
    fn mark_used(&self, id: CodeId) -> Result<(), StoreError>;
}

impl<S> DailyCodeStore for Arc<S>
where
    S: DailyCodeStore + ?Sized,
{
    fn create(&self, code: DailyCode) -> Result<DailyCode, StoreError> {
        (**self).create(code)
    }

    fn list_for_day(&self, day: WorkDay) -> Result<Vec<DailyCode>, StoreError> {
        (**self).list_for_day(day)
    }

    fn mark_used(&self, id: CodeId) -> Result<(), StoreError> {
        (**self).mark_used(id)
    }
}

/// In-memory code table for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDailyCodeStore {
    rows: RwLock<HashMap<CodeId, DailyCode>>,
}

impl InMemoryDailyCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DailyCodeStore for InMemoryDailyCodeStore {
    fn create(&self, code: DailyCode) -> Result<DailyCode, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        rows.insert(code.id, code.clone());
        Ok(code)
    }

    fn list_for_day(&self, day: WorkDay) -> Result<Vec<DailyCode>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned())?;
        Ok(rows.values().filter(|c| c.day == day).cloned().collect())
    }

    fn mark_used(&self, id: CodeId) -> Result<(), StoreError> {
        // The write lock makes check-then-set atomic, which is exactly the
        // conditional-update contract a real backend provides.
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned())?;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        if row.used {
            return Err(StoreError::Conflict);
        }
        row.used = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;

    use fichaje_core::EmployeeId;

    use super::*;

    fn admin() -> EmployeeId {
        EmployeeId::from_uuid(uuid::Uuid::from_u128(0xAD))
    }

    fn issue_on(store: &InMemoryDailyCodeStore, day: u32) -> DailyCode {
        let created_at = Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(u64::from(day));
        let code = DailyCode::issue(WorkDay::of(created_at), admin(), created_at, &mut rng);
        store.create(code).unwrap()
    }

    #[test]
    fn codes_are_scoped_to_their_day() {
        let store = InMemoryDailyCodeStore::new();
        let on_tenth = issue_on(&store, 10);
        issue_on(&store, 11);

        let listed = store.list_for_day(on_tenth.day).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, on_tenth.id);
    }

    #[test]
    fn mark_used_flips_exactly_once() {
        let store = InMemoryDailyCodeStore::new();
        let code = issue_on(&store, 10);

        assert_eq!(store.mark_used(code.id), Ok(()));
        assert_eq!(store.mark_used(code.id), Err(StoreError::Conflict));
        assert_eq!(store.mark_used(code.id), Err(StoreError::Conflict));

        let listed = store.list_for_day(code.day).unwrap();
        assert!(listed[0].used);
    }

    #[test]
    fn mark_used_on_missing_row_is_not_found() {
        let store = InMemoryDailyCodeStore::new();
        assert_eq!(store.mark_used(CodeId::new()), Err(StoreError::NotFound));
    }
}
