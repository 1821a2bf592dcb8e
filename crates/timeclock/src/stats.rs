//! Derived daily statistics.

use chrono::{DateTime, TimeDelta, Utc};

use crate::action::ClockAction;
use crate::entry::TimeEntry;

/// A day's derived numbers, recomputed on demand. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStats {
    /// Timestamp of the first clock-in, if any.
    pub entry_time: Option<DateTime<Utc>>,
    /// Worked time: shift span minus breaks and lunch.
    pub effective: TimeDelta,
    pub break_time: TimeDelta,
    pub lunch_time: TimeDelta,
    /// The day's entries, newest first (display order).
    pub recent_entries: Vec<TimeEntry>,
}

/// Compute a day's statistics in a single walk over the ordered history.
///
/// `now` is passed in rather than read from the system clock, which keeps the
/// function pure; it is only consulted while a shift, break or lunch is still
/// open.
///
/// Upstream histories can be incomplete, so malformed sequences degrade
/// instead of failing:
///
/// - a later clock-in never moves `entry_time` back;
/// - an unmatched break/lunch start runs until its end event, or until the
///   clock-out that closes the shift, or until `now`;
/// - an end event with nothing open (orphan `SALIDA`, `DESCANSO_FIN`,
///   `COMIDA_FIN`) is ignored;
/// - out-of-order pairs contribute zero rather than negative time, and
///   `effective` is clamped at zero.
pub fn compute_day_stats(history: &[TimeEntry], now: DateTime<Utc>) -> DayStats {
    let mut entry_time: Option<DateTime<Utc>> = None;
    let mut last_out: Option<DateTime<Utc>> = None;
    let mut on_shift = false;

    let mut break_time = TimeDelta::zero();
    let mut lunch_time = TimeDelta::zero();
    let mut open_break: Option<DateTime<Utc>> = None;
    let mut open_lunch: Option<DateTime<Utc>> = None;

    for entry in history {
        match entry.action {
            ClockAction::ClockIn => {
                if entry_time.is_none() {
                    entry_time = Some(entry.timestamp);
                }
                on_shift = true;
            }
            ClockAction::ClockOut => {
                if on_shift {
                    if let Some(start) = open_break.take() {
                        break_time += span(start, entry.timestamp);
                    }
                    if let Some(start) = open_lunch.take() {
                        lunch_time += span(start, entry.timestamp);
                    }
                    last_out = Some(entry.timestamp);
                    on_shift = false;
                }
            }
            ClockAction::BreakStart => {
                if open_break.is_none() {
                    open_break = Some(entry.timestamp);
                }
            }
            ClockAction::BreakEnd => {
                if let Some(start) = open_break.take() {
                    break_time += span(start, entry.timestamp);
                }
            }
            ClockAction::LunchStart => {
                if open_lunch.is_none() {
                    open_lunch = Some(entry.timestamp);
                }
            }
            ClockAction::LunchEnd => {
                if let Some(start) = open_lunch.take() {
                    lunch_time += span(start, entry.timestamp);
                }
            }
        }
    }

    // Still-open pauses run until now.
    if let Some(start) = open_break.take() {
        break_time += span(start, now);
    }
    if let Some(start) = open_lunch.take() {
        lunch_time += span(start, now);
    }

    let shift_end = if on_shift { Some(now) } else { last_out };
    let effective = match (entry_time, shift_end) {
        (Some(start), Some(end)) => {
            clamp(end.signed_duration_since(start) - break_time - lunch_time)
        }
        _ => TimeDelta::zero(),
    };

    let mut recent_entries = history.to_vec();
    recent_entries.reverse();

    DayStats {
        entry_time,
        effective,
        break_time,
        lunch_time,
        recent_entries,
    }
}

fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeDelta {
    clamp(end.signed_duration_since(start))
}

fn clamp(delta: TimeDelta) -> TimeDelta {
    delta.max(TimeDelta::zero())
}
