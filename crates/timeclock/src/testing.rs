//! Shared fixtures for the crate's unit tests.

use chrono::{DateTime, TimeZone, Utc};

use fichaje_core::EmployeeId;

use crate::action::ClockAction;
use crate::entry::TimeEntry;

/// A fixed instant on the test day (2024-01-10).
pub fn t(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
}

/// An entry for the fixed test employee, validated by a fixed issuer.
pub fn entry(action: ClockAction, timestamp: DateTime<Utc>) -> TimeEntry {
    TimeEntry::record(test_employee(), action, timestamp, test_issuer())
}

pub fn test_employee() -> EmployeeId {
    EmployeeId::from_uuid(uuid::Uuid::from_u128(0xE1))
}

pub fn test_issuer() -> EmployeeId {
    EmployeeId::from_uuid(uuid::Uuid::from_u128(0xAD))
}
