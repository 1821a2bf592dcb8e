use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use fichaje_employees::Employee;
use fichaje_leave::LeaveType;
use fichaje_timeclock::{ClockAction, DayStats, TimeEntry};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SubmitEntryRequest {
    pub action: ClockAction,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLeaveRequest {
    /// Wire name matches the legacy rows (`type`).
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub id: String,
    pub action: ClockAction,
    pub timestamp: DateTime<Utc>,
    /// Wall-clock rendering for the activity panel.
    pub time: String,
    pub validated_by: String,
}

impl EntryRow {
    pub fn from_entry(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            action: entry.action,
            timestamp: entry.timestamp,
            time: entry.timestamp.format("%H:%M:%S").to_string(),
            validated_by: entry.validated_by.to_string(),
        }
    }
}

/// A row in the admin day view: entry plus who it belongs to.
#[derive(Debug, Serialize)]
pub struct AdminEntryRow {
    #[serde(flatten)]
    pub entry: EntryRow,
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub employee_dni: Option<String>,
}

impl AdminEntryRow {
    pub fn new(entry: &TimeEntry, employee: Option<&Employee>) -> Self {
        Self {
            entry: EntryRow::from_entry(entry),
            employee_id: entry.employee_id.to_string(),
            employee_name: employee.map(|e| e.name.clone()),
            employee_dni: employee.map(|e| e.dni.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayStatsResponse {
    /// `HH:MM` of the first clock-in, if any.
    pub entry_time: Option<String>,
    pub effective_time: String,
    pub break_time: String,
    pub lunch_time: String,
    pub recent_entries: Vec<EntryRow>,
}

impl DayStatsResponse {
    pub fn from_stats(stats: &DayStats) -> Self {
        Self {
            entry_time: stats.entry_time.map(|t| t.format("%H:%M").to_string()),
            effective_time: format_hhmm(stats.effective),
            break_time: format_hhmm(stats.break_time),
            lunch_time: format_hhmm(stats.lunch_time),
            recent_entries: stats.recent_entries.iter().map(EntryRow::from_entry).collect(),
        }
    }
}

/// `HH:MM`, clamped at zero, whole minutes.
pub fn format_hhmm(delta: TimeDelta) -> String {
    let minutes = delta.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
