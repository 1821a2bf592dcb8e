//! Store boundaries.
//!
//! Each collection gets an object-safe trait plus an in-memory
//! implementation (tests/dev). The in-memory stores are honest about the
//! semantics a real backend must provide - in particular the conditional
//! update behind [`DailyCodeStore::mark_used`], which is the single
//! synchronization point the code gate relies on.

use thiserror::Error;

pub mod daily_codes;
pub mod employees;
pub mod leave_requests;
pub mod time_entries;

pub use daily_codes::{DailyCodeStore, InMemoryDailyCodeStore};
pub use employees::{EmployeeStore, InMemoryEmployeeStore};
pub use leave_requests::{InMemoryLeaveRequestStore, LeaveRequestStore};
pub use time_entries::{InMemoryTimeEntryStore, TimeEntryStore};

/// Store operation error.
///
/// Infrastructure failures only; domain rejections never appear here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced row does not exist.
    #[error("row not found")]
    NotFound,

    /// A conditional update lost: the row was no longer in the expected
    /// state (e.g. a daily code already marked used).
    #[error("conditional update conflict")]
    Conflict,

    /// The backend could not serve the request (network, poisoned lock,
    /// ...). Retryable by the caller; the core never retries internally.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}
