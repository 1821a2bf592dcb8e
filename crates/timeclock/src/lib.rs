//! `fichaje-timeclock` — the employee clock domain.
//!
//! Pure functions over an ordered log of time entries: no IO, no storage,
//! no clock reads. The employee's current state is always *derived* from the
//! day's history rather than persisted, so stored state can never drift from
//! the log that justifies it.

pub mod action;
pub mod entry;
pub mod sequence;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use action::ClockAction;
pub use entry::TimeEntry;
pub use sequence::{validate_action, SequenceViolation};
pub use state::{derive_state, ClockState};
pub use stats::{compute_day_stats, DayStats};
