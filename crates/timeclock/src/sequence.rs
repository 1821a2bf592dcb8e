//! Sequence validation: which clock action is legal next.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::ClockAction;
use crate::entry::TimeEntry;
use crate::state::{derive_state, ClockState};

/// Why a clock action was rejected.
///
/// User-correctable: the caller shows the message and the employee picks a
/// different action. Nothing is recorded on rejection.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceViolation {
    /// A clock-in while already clocked in (possibly on break/lunch).
    #[error("cannot clock in again without clocking out first")]
    DuplicateEntry,

    /// An action that needs an open working period, with none open.
    #[error("no open clock-in for this action")]
    MissingEntry,

    /// A break end with no break in progress.
    #[error("cannot end a break that was not started")]
    BreakNotStarted,

    /// A lunch end with no lunch in progress.
    #[error("cannot end a lunch that was not started")]
    LunchNotStarted,
}

/// The transition table.
///
/// | state    | ENTRADA | SALIDA | DESC_INICIO | DESC_FIN | COM_INICIO | COM_FIN |
/// |----------|---------|--------|-------------|----------|------------|---------|
/// | Out      | In      | -      | -           | -        | -          | -       |
/// | In       | -       | Out    | OnBreak     | -        | AtLunch    | -       |
/// | OnBreak  | -       | -      | -           | In       | -          | -       |
/// | AtLunch  | -       | -      | -           | -        | -          | In      |
///
/// Every rejected cell maps to exactly one [`SequenceViolation`].
pub fn permitted(
    state: ClockState,
    action: ClockAction,
) -> Result<ClockState, SequenceViolation> {
    use ClockAction::*;
    use ClockState::*;

    match (state, action) {
        (Out, ClockIn) => Ok(In),
        (In, ClockOut) => Ok(Out),
        (In, BreakStart) => Ok(OnBreak),
        (In, LunchStart) => Ok(AtLunch),
        (OnBreak, BreakEnd) => Ok(In),
        (AtLunch, LunchEnd) => Ok(In),

        (_, ClockIn) => Err(SequenceViolation::DuplicateEntry),
        (_, ClockOut) | (_, BreakStart) | (_, LunchStart) => {
            Err(SequenceViolation::MissingEntry)
        }
        (_, BreakEnd) => Err(SequenceViolation::BreakNotStarted),
        (_, LunchEnd) => Err(SequenceViolation::LunchNotStarted),
    }
}

/// Validate `action` against a day's history (ascending by timestamp).
///
/// Pure and total: no IO, no mutation, defined for any finite history. On
/// success returns the state the employee will be in once the action is
/// recorded.
pub fn validate_action(
    history: &[TimeEntry],
    action: ClockAction,
) -> Result<ClockState, SequenceViolation> {
    permitted(derive_state(history), action)
}
