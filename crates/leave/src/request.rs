//! Leave request lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fichaje_core::{DomainError, DomainResult, EmployeeId, LeaveRequestId};

/// Kind of leave. Wire tokens match the legacy request rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    #[serde(rename = "ENFERMEDAD")]
    Sick,
    #[serde(rename = "VACACIONES")]
    Vacation,
    #[serde(rename = "PERSONAL")]
    Personal,
}

/// Request status. Created `Pending`; decided exactly once.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// An admin's verdict on a pending request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub employee_id: EmployeeId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// Admin who decided the request; `None` while pending.
    pub approved_by: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Create a pending request.
    ///
    /// The date range must be non-empty (`start <= end`).
    pub fn submit(
        employee_id: EmployeeId,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation(
                "leave end date precedes start date",
            ));
        }

        Ok(Self {
            id: LeaveRequestId::new(),
            employee_id,
            leave_type,
            start_date,
            end_date,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            approved_by: None,
            created_at,
        })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, LeaveStatus::Pending)
    }

    /// Apply an admin decision. Only pending requests can be decided.
    pub fn decide(&mut self, decision: LeaveDecision, admin: EmployeeId) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::conflict(format!(
                "leave request already {}",
                match self.status {
                    LeaveStatus::Approved => "approved",
                    LeaveStatus::Rejected => "rejected",
                    LeaveStatus::Pending => "pending",
                }
            )));
        }

        self.status = match decision {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        };
        self.approved_by = Some(admin);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn employee() -> EmployeeId {
        EmployeeId::from_uuid(uuid::Uuid::from_u128(0xE1))
    }

    fn admin() -> EmployeeId {
        EmployeeId::from_uuid(uuid::Uuid::from_u128(0xAD))
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap()
    }

    fn pending() -> LeaveRequest {
        LeaveRequest::submit(employee(), LeaveType::Vacation, date(10), date(12), "trip", now())
            .unwrap()
    }

    #[test]
    fn submit_starts_pending() {
        let request = pending();
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.approved_by, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = LeaveRequest::submit(
            employee(),
            LeaveType::Sick,
            date(12),
            date(10),
            "",
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn single_day_range_is_fine() {
        assert!(
            LeaveRequest::submit(employee(), LeaveType::Personal, date(10), date(10), "", now())
                .is_ok()
        );
    }

    #[test]
    fn approve_records_the_admin() {
        let mut request = pending();
        request.decide(LeaveDecision::Approve, admin()).unwrap();

        assert_eq!(request.status, LeaveStatus::Approved);
        assert_eq!(request.approved_by, Some(admin()));
    }

    #[test]
    fn decided_requests_cannot_be_redecided() {
        let mut request = pending();
        request.decide(LeaveDecision::Reject, admin()).unwrap();

        let err = request.decide(LeaveDecision::Approve, admin()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(request.status, LeaveStatus::Rejected);
    }

    #[test]
    fn wire_tokens_match_legacy_rows() {
        assert_eq!(
            serde_json::to_string(&LeaveType::Sick).unwrap(),
            "\"ENFERMEDAD\""
        );
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }
}
