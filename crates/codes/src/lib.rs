//! `fichaje-codes` — the daily validation code domain.
//!
//! An administrator issues a short single-use code each day; employees must
//! supply it for a clock action to be accepted. This crate holds the code
//! record, token generation, and the pure gate decision. Atomic consumption
//! lives at the store boundary (`fichaje-infra`).

pub mod code;

pub use code::{check, select_active, CodeRejection, DailyCode, CODE_LEN};
