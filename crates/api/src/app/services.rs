//! Infrastructure wiring behind the HTTP handlers.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use fichaje_auth::Role;
use fichaje_codes::{select_active, DailyCode};
use fichaje_core::{EmployeeId, EntryId, LeaveRequestId, WorkDay};
use fichaje_employees::Employee;
use fichaje_infra::{
    ChangeEvent, ChangeFeed, ClockRegistrar, Collection, DailyCodeStore, EmployeeStore,
    InMemoryChangeFeed, InMemoryDailyCodeStore, InMemoryEmployeeStore, InMemoryLeaveRequestStore,
    InMemoryTimeEntryStore, LeaveRequestStore, StoreError, SubmitError, TimeEntryStore,
};
use fichaje_leave::{LeaveDecision, LeaveRequest};
use fichaje_timeclock::{compute_day_stats, ClockAction, DayStats, TimeEntry};

/// Realtime message broadcast via SSE.
///
/// Notification-only, like the change feed it mirrors: clients re-fetch
/// through the regular endpoints.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RealtimeMessage {
    pub topic: String,
    pub payload: serde_json::Value,
}

type Feed = Arc<InMemoryChangeFeed<ChangeEvent>>;
type Registrar =
    ClockRegistrar<Arc<InMemoryTimeEntryStore>, Arc<InMemoryDailyCodeStore>, Feed>;

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminOverview {
    pub active_employees: usize,
    pub today_entries: usize,
    /// Employees (role EMPLOYEE) with no entry today.
    pub absences: usize,
}

pub struct AppServices {
    entries: Arc<InMemoryTimeEntryStore>,
    codes: Arc<InMemoryDailyCodeStore>,
    employees: Arc<InMemoryEmployeeStore>,
    leave: Arc<InMemoryLeaveRequestStore>,
    feed: Feed,
    registrar: Registrar,
    realtime_tx: broadcast::Sender<RealtimeMessage>,
}

/// In-memory wiring (dev/test): stores + feed + registrar + SSE bridge.
pub fn build_services() -> AppServices {
    let entries = Arc::new(InMemoryTimeEntryStore::new());
    let codes = Arc::new(InMemoryDailyCodeStore::new());
    let employees = Arc::new(InMemoryEmployeeStore::new());
    let leave = Arc::new(InMemoryLeaveRequestStore::new());
    let feed: Feed = Arc::new(InMemoryChangeFeed::new());

    // Realtime channel (SSE): lossy broadcast, fan-out in handlers.
    let (realtime_tx, _realtime_rx) = broadcast::channel::<RealtimeMessage>(256);

    // Background subscriber: change feed -> SSE broadcast.
    {
        let sub = feed.subscribe();
        let tx = realtime_tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match sub.recv() {
                Ok(event) => {
                    let message = RealtimeMessage {
                        topic: topic_for(event.collection).to_string(),
                        payload: serde_json::json!({
                            "kind": event.kind,
                            "collection": event.collection,
                            "id": event.id,
                            "day": event.day,
                        }),
                    };
                    // Lossy; no backpressure on the stores.
                    let _ = tx.send(message);
                }
                Err(_) => break,
            }
        });
    }

    let registrar = ClockRegistrar::new(entries.clone(), codes.clone(), feed.clone());

    AppServices {
        entries,
        codes,
        employees,
        leave,
        feed,
        registrar,
        realtime_tx,
    }
}

fn topic_for(collection: Collection) -> &'static str {
    match collection {
        Collection::TimeEntries => "time_entries.changed",
        Collection::DailyCodes => "daily_codes.changed",
        Collection::LeaveRequests => "leave_requests.changed",
        Collection::Employees => "employees.changed",
    }
}

impl AppServices {
    fn notify(&self, event: ChangeEvent) {
        if let Err(e) = self.feed.publish(event) {
            tracing::warn!(error = ?e, "change feed publish failed");
        }
    }

    /// Directory row for a principal, provisioned with defaults on first
    /// contact.
    pub fn ensure_profile(
        &self,
        id: EmployeeId,
        email: &str,
        role: Role,
    ) -> Result<Employee, StoreError> {
        if let Some(found) = self.employees.get(id)? {
            return Ok(found);
        }

        let created = self
            .employees
            .upsert(Employee::provision_default(id, email, role))?;
        tracing::info!(employee_id = %id, "provisioned directory profile");
        self.notify(ChangeEvent::inserted(Collection::Employees, created.id, None));
        Ok(created)
    }

    pub fn submit_entry(
        &self,
        employee_id: EmployeeId,
        action: ClockAction,
        entered_code: &str,
        now: DateTime<Utc>,
    ) -> Result<TimeEntry, SubmitError> {
        self.registrar.submit(employee_id, action, entered_code, now)
    }

    pub fn today_stats(
        &self,
        employee_id: EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<DayStats, StoreError> {
        let history = self
            .entries
            .list_for_employee_on_day(employee_id, WorkDay::of(now))?;
        Ok(compute_day_stats(&history, now))
    }

    /// The caller's entries for today, newest first.
    pub fn today_entries(
        &self,
        employee_id: EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let mut history = self
            .entries
            .list_for_employee_on_day(employee_id, WorkDay::of(now))?;
        history.reverse();
        Ok(history)
    }

    pub fn admin_overview(&self, now: DateTime<Utc>) -> Result<AdminOverview, StoreError> {
        let employees = self.employees.list()?;
        let entries = self.entries.list_on_day(WorkDay::of(now))?;

        let clocked: HashSet<EmployeeId> = entries.iter().map(|e| e.employee_id).collect();
        let staff: Vec<_> = employees
            .iter()
            .filter(|e| e.role == Role::Employee)
            .collect();

        Ok(AdminOverview {
            active_employees: staff.len(),
            today_entries: entries.len(),
            absences: staff.iter().filter(|e| !clocked.contains(&e.id)).count(),
        })
    }

    /// Issue a fresh daily code. Earlier unused codes stay consumable.
    pub fn issue_code(
        &self,
        admin: EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<DailyCode, StoreError> {
        let day = WorkDay::of(now);
        let code = DailyCode::issue(day, admin, now, &mut rand::thread_rng());
        let created = self.codes.create(code)?;
        tracing::info!(code_id = %created.id, %day, "daily code issued");
        self.notify(ChangeEvent::inserted(
            Collection::DailyCodes,
            created.id,
            Some(day),
        ));
        Ok(created)
    }

    /// The active code for today, if any.
    pub fn current_code(&self, now: DateTime<Utc>) -> Result<Option<DailyCode>, StoreError> {
        let day_codes = self.codes.list_for_day(WorkDay::of(now))?;
        Ok(select_active(&day_codes).cloned())
    }

    /// Today's entries across all employees, newest first, with the
    /// directory row when one exists.
    pub fn entries_overview(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(TimeEntry, Option<Employee>)>, StoreError> {
        let mut entries = self.entries.list_on_day(WorkDay::of(now))?;
        entries.reverse();

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let employee = self.employees.get(entry.employee_id)?;
            rows.push((entry, employee));
        }
        Ok(rows)
    }

    pub fn revalidate_entry(
        &self,
        id: EntryId,
        admin: EmployeeId,
    ) -> Result<TimeEntry, StoreError> {
        let updated = self.entries.set_validated_by(id, admin)?;
        self.notify(ChangeEvent::updated(
            Collection::TimeEntries,
            updated.id,
            Some(updated.day()),
        ));
        Ok(updated)
    }

    pub fn create_leave(&self, request: LeaveRequest) -> Result<LeaveRequest, StoreError> {
        let created = self.leave.create(request)?;
        self.notify(ChangeEvent::inserted(
            Collection::LeaveRequests,
            created.id,
            None,
        ));
        Ok(created)
    }

    pub fn my_leave(&self, employee_id: EmployeeId) -> Result<Vec<LeaveRequest>, StoreError> {
        self.leave.list_for_employee(employee_id)
    }

    pub fn all_leave(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        self.leave.list_all()
    }

    pub fn decide_leave(
        &self,
        id: LeaveRequestId,
        decision: LeaveDecision,
        admin: EmployeeId,
    ) -> Result<LeaveRequest, StoreError> {
        let decided = self.leave.decide(id, decision, admin)?;
        self.notify(ChangeEvent::updated(
            Collection::LeaveRequests,
            decided.id,
            None,
        ));
        Ok(decided)
    }
}

/// SSE stream of realtime notifications.
///
/// Lagged receivers drop messages rather than block publishers; that is fine
/// because every message is only a refresh trigger.
pub fn sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.realtime_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|message| {
        let message = message.ok()?;
        let json = serde_json::to_string(&message).ok()?;
        Some(Ok(SseEvent::default().event("change").data(json)))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
