//! Change notifications (mechanics only).
//!
//! A lightweight pub/sub seam: stores of record stay the source of truth,
//! and feed messages only *announce* that a collection changed so
//! subscribers can re-fetch. Messages never carry authoritative state, so a
//! lost or duplicated notification costs at most one redundant or delayed
//! re-fetch - subscribers must treat every notification as an idempotent
//! refresh trigger.

use std::sync::mpsc::Receiver;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use fichaje_core::WorkDay;

/// Which collection changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    TimeEntries,
    DailyCodes,
    LeaveRequests,
    Employees,
}

/// What happened to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Updated,
}

/// A notification that one row in one collection changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// The affected row id, as a string (display form of the typed id).
    pub id: String,
    /// The day the change belongs to, when the collection is day-scoped.
    pub day: Option<WorkDay>,
}

impl ChangeEvent {
    pub fn inserted(collection: Collection, id: impl ToString, day: Option<WorkDay>) -> Self {
        Self {
            collection,
            kind: ChangeKind::Inserted,
            id: id.to_string(),
            day,
        }
    }

    pub fn updated(collection: Collection, id: impl ToString, day: Option<WorkDay>) -> Self {
        Self {
            collection,
            kind: ChangeKind::Updated,
            id: id.to_string(),
            day,
        }
    }
}

/// A subscription to a change stream.
///
/// Designed for single-threaded consumption; each subscriber gets a copy of
/// every message published after it subscribed (broadcast semantics).
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Transport-agnostic change feed (pub/sub abstraction).
///
/// Best-effort, at-least-once: consumers must be idempotent. Publication
/// failures are surfaced to the caller, which typically logs and moves on -
/// the store write that triggered the notification has already happened.
pub trait ChangeFeed<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, F> ChangeFeed<M> for Arc<F>
where
    F: ChangeFeed<M> + ?Sized,
{
    type Error = F::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

#[derive(Debug)]
pub enum InMemoryFeedError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory fan-out feed.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - At-least-once acceptable (subscribers must be idempotent)
#[derive(Debug)]
pub struct InMemoryChangeFeed<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryChangeFeed<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemoryChangeFeed<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> ChangeFeed<M> for InMemoryChangeFeed<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryFeedError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryFeedError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_message() {
        let feed: InMemoryChangeFeed<ChangeEvent> = InMemoryChangeFeed::new();
        let a = feed.subscribe();
        let b = feed.subscribe();

        let event = ChangeEvent::inserted(Collection::TimeEntries, "e-1", None);
        feed.publish(event.clone()).unwrap();

        assert_eq!(a.try_recv().unwrap(), event);
        assert_eq!(b.try_recv().unwrap(), event);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let feed: InMemoryChangeFeed<ChangeEvent> = InMemoryChangeFeed::new();
        drop(feed.subscribe());

        feed.publish(ChangeEvent::updated(Collection::DailyCodes, "c-1", None))
            .unwrap();

        let live = feed.subscribe();
        feed.publish(ChangeEvent::updated(Collection::DailyCodes, "c-2", None))
            .unwrap();
        assert_eq!(live.try_recv().unwrap().id, "c-2");
    }
}
