//! `fichaje-infra` — storage boundaries and submit orchestration.
//!
//! Domain crates stay pure; this crate owns the seams to the outside world:
//! store traits with in-memory implementations, the change feed, and the
//! [`registrar::ClockRegistrar`] that drives one clock-action submission
//! end to end.

pub mod changefeed;
pub mod registrar;
pub mod stores;


pub use changefeed::{ChangeEvent, ChangeFeed, ChangeKind, Collection, InMemoryChangeFeed, Subscription};
pub use registrar::{ClockRegistrar, SubmitError};
pub use stores::{
    DailyCodeStore, EmployeeStore, InMemoryDailyCodeStore, InMemoryEmployeeStore,
    InMemoryLeaveRequestStore, InMemoryTimeEntryStore, LeaveRequestStore, StoreError,
    TimeEntryStore,
};
