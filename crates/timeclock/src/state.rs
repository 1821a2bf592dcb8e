//! Clock state, derived from the day's history.

use serde::{Deserialize, Serialize};

use crate::action::ClockAction;
use crate::entry::TimeEntry;

/// Where an employee is in their working day.
///
/// Never persisted: always recomputed from the action of the most recent
/// entry of the day, so the state cannot drift from the log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockState {
    /// Not clocked in (also the state before the first entry of the day).
    #[default]
    Out,
    /// Clocked in and working.
    In,
    /// On a short break.
    OnBreak,
    /// On the lunch pause.
    AtLunch,
}

impl ClockState {
    /// The state an employee is in right after recording `action`.
    pub fn after(action: ClockAction) -> Self {
        match action {
            ClockAction::ClockIn => ClockState::In,
            ClockAction::ClockOut => ClockState::Out,
            ClockAction::BreakStart => ClockState::OnBreak,
            ClockAction::BreakEnd => ClockState::In,
            ClockAction::LunchStart => ClockState::AtLunch,
            ClockAction::LunchEnd => ClockState::In,
        }
    }
}

impl core::fmt::Display for ClockState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ClockState::Out => "OUT",
            ClockState::In => "IN",
            ClockState::OnBreak => "ON_BREAK",
            ClockState::AtLunch => "AT_LUNCH",
        };
        f.write_str(s)
    }
}

/// Derive the current state from a day's history (ascending by timestamp).
///
/// No entry ⇒ [`ClockState::Out`].
pub fn derive_state(history: &[TimeEntry]) -> ClockState {
    history
        .last()
        .map(|entry| ClockState::after(entry.action))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entry, t};

    #[test]
    fn empty_history_is_out() {
        assert_eq!(derive_state(&[]), ClockState::Out);
    }

    #[test]
    fn state_follows_last_entry_only() {
        let history = vec![
            entry(ClockAction::ClockIn, t(9, 0)),
            entry(ClockAction::BreakStart, t(11, 0)),
        ];
        assert_eq!(derive_state(&history), ClockState::OnBreak);

        let history = vec![
            entry(ClockAction::ClockIn, t(9, 0)),
            entry(ClockAction::LunchStart, t(13, 0)),
            entry(ClockAction::LunchEnd, t(14, 0)),
        ];
        assert_eq!(derive_state(&history), ClockState::In);

        let history = vec![
            entry(ClockAction::ClockIn, t(9, 0)),
            entry(ClockAction::ClockOut, t(17, 0)),
        ];
        assert_eq!(derive_state(&history), ClockState::Out);
    }
}
