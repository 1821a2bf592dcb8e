//! A single row in the clock log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fichaje_core::{EmployeeId, EntryId, WorkDay};

use crate::action::ClockAction;

/// One recorded clock action.
///
/// Entries are immutable once created and ordered by `timestamp` ascending
/// within a calendar day. The only field that may change after the fact is
/// `validated_by`, which an administrator may re-point to themselves when
/// reviewing the day's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub employee_id: EmployeeId,
    pub action: ClockAction,
    pub timestamp: DateTime<Utc>,
    /// Who vouched for this entry: the issuer of the consumed daily code,
    /// or an administrator after re-validation.
    pub validated_by: EmployeeId,
}

impl TimeEntry {
    pub fn record(
        employee_id: EmployeeId,
        action: ClockAction,
        timestamp: DateTime<Utc>,
        validated_by: EmployeeId,
    ) -> Self {
        Self {
            id: EntryId::new(),
            employee_id,
            action,
            timestamp,
            validated_by,
        }
    }

    pub fn day(&self) -> WorkDay {
        WorkDay::of(self.timestamp)
    }
}
