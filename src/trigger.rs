//! Decides when a form change becomes a service call, and which answers count.
//!
//! Every completeness-preserving revision issues a request tagged with the
//! next sequence number. Calls run concurrently and may finish in any order;
//! [`RequestTrigger::apply`] drops answers that are no longer the latest, so
//! the store never shows a result for inputs older than what is on screen.
//! Nothing is cancelled: stale calls run to completion and are ignored.

use futures::StreamExt;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::FuturesUnordered;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::assessor::{Assessor, RiskAssessment};
use crate::consts::DEFAULT_TIMEOUT;
use crate::error::{AssessError, ErrorKind};
use crate::form::{AssessmentRequest, FormState};
use crate::store::ResultStore;

/// Which answers are considered stale.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalenessPolicy {
    /// Drop every answer that isn't for the most recently issued request.
    #[default]
    LatestIssued,
    /// Drop an answer only if a newer one was already applied.
    LastApplied,
}

impl StalenessPolicy {
    fn is_stale(self, sequence: u64, last_applied: u64, last_issued: u64) -> bool {
        match self {
            Self::LatestIssued => sequence < last_issued,
            Self::LastApplied => sequence < last_applied,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriggerConfig {
    pub timeout: Duration,
    pub policy: StalenessPolicy,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            policy: StalenessPolicy::default(),
        }
    }
}

/// A finished call, tagged with the sequence it was issued under.
#[derive(Debug)]
pub struct Response {
    pub sequence: u64,
    pub outcome: Result<RiskAssessment, AssessError>,
}

/// What [`RequestTrigger::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Published,
    Failed(ErrorKind),
    Discarded,
}

pub struct RequestTrigger {
    assessor: Arc<dyn Assessor>,
    config: TriggerConfig,
    last_issued: u64,
    last_applied: u64,
    /// Answers at or below this sequence are dropped whatever the policy.
    invalidated_through: u64,
    seen_revision: Option<u64>,
    pending: BTreeSet<u64>,
    in_flight: FuturesUnordered<BoxFuture<'static, Response>>,
}

impl RequestTrigger {
    pub fn new(assessor: Arc<dyn Assessor>, config: TriggerConfig) -> Self {
        Self {
            assessor,
            config,
            last_issued: 0,
            last_applied: 0,
            invalidated_through: 0,
            seen_revision: None,
            pending: BTreeSet::new(),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// React to a form revision. Returns the sequence number if a request was issued.
    ///
    /// A revision already observed is ignored, as is an incomplete form.
    pub fn on_change(&mut self, form: &FormState) -> Option<u64> {
        if self.seen_revision == Some(form.revision()) {
            return None;
        }
        self.seen_revision = Some(form.revision());

        let request = form.snapshot()?;
        Some(self.issue(request))
    }

    /// Start a call for `request` under the next sequence number.
    pub fn issue(&mut self, request: AssessmentRequest) -> u64 {
        self.last_issued += 1;
        let sequence = self.last_issued;
        debug!(sequence, ?request, "issuing assessment request");

        let assessor = Arc::clone(&self.assessor);
        let timeout = self.config.timeout;
        let call = async move {
            let outcome = match tokio::time::timeout(timeout, assessor.assess(&request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AssessError::Timeout(timeout)),
            };
            Response { sequence, outcome }
        };

        self.pending.insert(sequence);
        self.in_flight.push(call.boxed());
        sequence
    }

    /// Wait for the next call to finish, in completion order.
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next_response(&mut self) -> Option<Response> {
        self.in_flight.next().await
    }

    /// Apply a finished call to the store, unless it is stale.
    pub fn apply(&mut self, response: Response, store: &mut ResultStore) -> Applied {
        let Response { sequence, outcome } = response;
        self.pending.remove(&sequence);

        if sequence <= self.invalidated_through
            || self
                .config
                .policy
                .is_stale(sequence, self.last_applied, self.last_issued)
        {
            debug!(
                sequence,
                last_applied = self.last_applied,
                last_issued = self.last_issued,
                "discarding stale response"
            );
            return Applied::Discarded;
        }

        self.last_applied = sequence;
        match outcome {
            Ok(result) => {
                debug!(sequence, bmi = result.bmi_value, "publishing assessment");
                store.publish(result);
                Applied::Published
            }
            Err(e) => {
                warn!(sequence, error = %e, "assessment request failed");
                let kind = e.kind();
                store.publish_error(kind);
                Applied::Failed(kind)
            }
        }
    }

    /// Mark every request issued so far as stale. Calls still in flight run
    /// to completion but their answers are discarded.
    pub fn invalidate(&mut self) {
        self.invalidated_through = self.last_issued;
        debug!(through = self.last_issued, "invalidated in-flight requests");
    }

    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }

    /// Sequences issued but not yet answered.
    pub fn pending(&self) -> &BTreeSet<u64> {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
