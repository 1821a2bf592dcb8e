//! `fichaje-leave` — leave requests (sick leave, vacation, personal days).

pub mod request;

pub use request::{LeaveDecision, LeaveRequest, LeaveStatus, LeaveType};
