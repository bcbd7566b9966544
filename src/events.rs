//! Decoupled event bus for session notifications.
//!
//! The session emits events via [`EventBus::emit`]; anything interested
//! (a renderer, a logger, a test) subscribes via [`EventBus::subscribe`].
//! Built on [`tokio::sync::broadcast`] so multiple listeners can react
//! independently.

use tokio::sync::broadcast;

use crate::error::ErrorKind;
use crate::form::{Field, Rejection};

/// Events that flow out of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A request was sent for the current form revision.
    RequestIssued { sequence: u64 },
    /// A response was published to the result store.
    ResultApplied { sequence: u64 },
    /// A non-stale request failed; the previous result stays.
    RequestFailed { sequence: u64, kind: ErrorKind },
    /// A response arrived for a request that is no longer the latest.
    ResponseDiscarded { sequence: u64 },
    /// A field update was refused; the field kept its value.
    InputRejected { field: Field, reason: Rejection },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
