//! The interactive loop state: form, trigger and store, owned by one task.
//!
//! Inputs are applied synchronously. The only suspension point is waiting
//! for the next service answer (or the debounce window), exposed through
//! [`Session::tick`], which is cancel-safe and can sit in a `select!` next to
//! the terminal reader.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::debug;

use crate::assessor::Assessor;
use crate::config::Config;
use crate::error::ErrorKind;
use crate::events::{Event, EventBus};
use crate::form::{Field, FormState, Rejection, Sex};
use crate::store::ResultStore;
use crate::trigger::{Applied, RequestTrigger};

/// What one [`Session::tick`] accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The debounce window closed and a request went out.
    Issued(u64),
    Applied(u64),
    Failed { sequence: u64, kind: ErrorKind },
    Discarded(u64),
    /// Nothing to wait for, or the debounce window closed on an incomplete form.
    Idle,
}

pub struct Session {
    form: FormState,
    trigger: RequestTrigger,
    store: ResultStore,
    events: EventBus,
    debounce: Option<Duration>,
    deadline: Option<Instant>,
}

impl Session {
    pub fn new(assessor: Arc<dyn Assessor>, config: &Config) -> Self {
        Self {
            form: FormState::new(),
            trigger: RequestTrigger::new(assessor, config.trigger()),
            store: ResultStore::new(),
            events: EventBus::default(),
            debounce: config.debounce,
            deadline: None,
        }
    }

    /// Apply a keystroke-level update to one numeric field.
    ///
    /// Returns the sequence of the request it issued, if any. With debounce
    /// on, the request goes out later from [`Session::tick`].
    pub fn input(&mut self, field: Field, raw: &str) -> Result<Option<u64>, Rejection> {
        match self.form.update(field, raw) {
            Ok(true) => Ok(self.schedule()),
            Ok(false) => Ok(None),
            Err(reason) => {
                debug!(%field, raw, %reason, "input rejected");
                self.events.emit(Event::InputRejected {
                    field,
                    reason: reason.clone(),
                });
                Err(reason)
            }
        }
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) -> Option<u64> {
        if self.form.update_sex(sex) {
            self.schedule()
        } else {
            None
        }
    }

    /// Empty the form and the store. Answers to requests still in flight
    /// are discarded when they arrive.
    pub fn reset(&mut self) {
        self.form.clear();
        self.store.clear();
        self.trigger.invalidate();
        self.schedule();
    }

    /// Wait for the next internal event and process it.
    pub async fn tick(&mut self) -> Progress {
        let deadline = self.deadline;
        let debounce = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = debounce, if deadline.is_some() => {
                self.deadline = None;
                match self.fire() {
                    Some(sequence) => Progress::Issued(sequence),
                    None => Progress::Idle,
                }
            }
            Some(response) = self.trigger.next_response() => {
                let sequence = response.sequence;
                match self.trigger.apply(response, &mut self.store) {
                    Applied::Published => {
                        self.events.emit(Event::ResultApplied { sequence });
                        Progress::Applied(sequence)
                    }
                    Applied::Failed(kind) => {
                        self.events.emit(Event::RequestFailed { sequence, kind });
                        Progress::Failed { sequence, kind }
                    }
                    Applied::Discarded => {
                        self.events.emit(Event::ResponseDiscarded { sequence });
                        Progress::Discarded(sequence)
                    }
                }
            }
            else => Progress::Idle,
        }
    }

    /// Process events until no request is pending and no debounce window is open.
    pub async fn settle(&mut self) {
        while !self.is_idle() {
            self.tick().await;
        }
    }

    pub fn is_idle(&self) -> bool {
        self.deadline.is_none() && !self.trigger.has_pending()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn trigger(&self) -> &RequestTrigger {
        &self.trigger
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    fn schedule(&mut self) -> Option<u64> {
        match self.debounce {
            Some(window) => {
                self.deadline = Some(Instant::now() + window);
                None
            }
            None => self.fire(),
        }
    }

    fn fire(&mut self) -> Option<u64> {
        let sequence = self.trigger.on_change(&self.form)?;
        self.events.emit(Event::RequestIssued { sequence });
        Some(sequence)
    }
}
