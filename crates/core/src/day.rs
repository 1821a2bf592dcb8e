//! Calendar-day boundary used by code issuance and entry queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar day in the clocking domain.
///
/// The day boundary is **UTC midnight**, applied uniformly: a daily code is
/// issued for a UTC day, and an employee's "today" history is the set of
/// entries whose timestamp falls on the same UTC date. Mixing conventions
/// between issuance and querying is exactly the drift this newtype prevents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDay(NaiveDate);

impl WorkDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day an instant falls on.
    pub fn of(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// Today, by the UTC convention.
    pub fn today() -> Self {
        Self::of(Utc::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whether `instant` falls on this day.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant.date_naive() == self.0
    }
}

impl core::fmt::Display for WorkDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for WorkDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_boundary_is_utc_midnight() {
        let just_before = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
        let just_after = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();

        assert_ne!(WorkDay::of(just_before), WorkDay::of(just_after));
        assert!(WorkDay::of(just_before).contains(just_before));
        assert!(!WorkDay::of(just_before).contains(just_after));
    }

    #[test]
    fn display_is_iso_date() {
        let day = WorkDay::of(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap());
        assert_eq!(day.to_string(), "2024-01-10");
    }
}
