//! One clock-action submission, end to end.

use chrono::{DateTime, Utc};
use thiserror::Error;

use fichaje_codes::{check, CodeRejection};
use fichaje_core::{EmployeeId, WorkDay};
use fichaje_timeclock::{validate_action, ClockAction, SequenceViolation, TimeEntry};

use crate::changefeed::{ChangeEvent, ChangeFeed, Collection};
use crate::stores::{DailyCodeStore, StoreError, TimeEntryStore};

/// Why a submission was not recorded.
///
/// Every variant leaves the clock log unchanged; only `Store { code_spent:
/// true }` leaves a side effect behind (one burned code).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The action is illegal in the employee's current state.
    /// User-correctable; the daily code was not touched.
    #[error("clock action rejected: {0}")]
    Sequence(#[from] SequenceViolation),

    /// The entered code did not gate the action. User-correctable. Covers a
    /// consume race lost to another submitter, which is indistinguishable
    /// from "no valid code" by design.
    #[error("validation code rejected: {0}")]
    Code(#[from] CodeRejection),

    /// The backend failed. Retryable by the caller; the core never retries.
    /// When `code_spent` is true the failure happened *after* the code was
    /// consumed, so the employee needs a fresh code for the retry.
    #[error("store failure: {source}")]
    Store {
        source: StoreError,
        code_spent: bool,
    },
}

impl SubmitError {
    fn store(source: StoreError) -> Self {
        SubmitError::Store {
            source,
            code_spent: false,
        }
    }
}

/// Drives one submission through validation, the code gate, and the append.
///
/// The order is deliberate: the sequence check runs **before** the code is
/// consumed, so a mis-tapped action never burns the day's code. The gate
/// then re-reads nothing - consumption is a single conditional update at the
/// store, which is what makes two concurrent submitters with the same code
/// resolve to exactly one winner.
///
/// Composes store traits only; no IO of its own, no in-process locking.
#[derive(Debug)]
pub struct ClockRegistrar<E, C, F> {
    entries: E,
    codes: C,
    feed: F,
}

impl<E, C, F> ClockRegistrar<E, C, F> {
    pub fn new(entries: E, codes: C, feed: F) -> Self {
        Self {
            entries,
            codes,
            feed,
        }
    }
}

impl<E, C, F> ClockRegistrar<E, C, F>
where
    E: TimeEntryStore,
    C: DailyCodeStore,
    F: ChangeFeed<ChangeEvent>,
{
    /// Submit one clock action for `employee_id` at `now`.
    ///
    /// On success the recorded entry is returned, with `validated_by` set to
    /// the issuer of the consumed code.
    pub fn submit(
        &self,
        employee_id: EmployeeId,
        action: ClockAction,
        entered_code: &str,
        now: DateTime<Utc>,
    ) -> Result<TimeEntry, SubmitError> {
        let day = WorkDay::of(now);

        // 1) Sequence check against today's history. Rejections are cheap
        //    and leave the code untouched.
        let history = self
            .entries
            .list_for_employee_on_day(employee_id, day)
            .map_err(SubmitError::store)?;
        let next_state = validate_action(&history, action)?;

        // 2) The code gate. A lost conditional update means another
        //    submitter consumed the code between our read and our write;
        //    report it as no-valid-code.
        let day_codes = self.codes.list_for_day(day).map_err(SubmitError::store)?;
        let code = check(&day_codes, entered_code)?;
        match self.codes.mark_used(code.id) {
            Ok(()) => {}
            Err(StoreError::Conflict) | Err(StoreError::NotFound) => {
                tracing::debug!(code_id = %code.id, "lost consume race for daily code");
                return Err(SubmitError::Code(CodeRejection::NotFound));
            }
            Err(source) => return Err(SubmitError::store(source)),
        }

        // 3) Append. From here on the code is spent, and a failure must say
        //    so to the employee.
        let entry = TimeEntry::record(employee_id, action, now, code.created_by);
        let entry = self.entries.append(entry).map_err(|source| {
            tracing::warn!(%employee_id, %action, "entry append failed after code consumption");
            SubmitError::Store {
                source,
                code_spent: true,
            }
        })?;

        tracing::info!(%employee_id, %action, state = %next_state, "clock action recorded");

        // 4) Notify. Best-effort: the entry is already durable, and
        //    subscribers re-fetch on their own cadence anyway.
        if let Err(e) = self.feed.publish(ChangeEvent::inserted(
            Collection::TimeEntries,
            entry.id,
            Some(day),
        )) {
            tracing::warn!(error = ?e, "change feed publish failed");
        }

        Ok(entry)
    }
}
