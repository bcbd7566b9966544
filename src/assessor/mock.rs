use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Assessor, RiskAssessment};
use crate::error::AssessError;
use crate::form::AssessmentRequest;

/// One scripted answer: wait `delay`, then return `outcome`.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub delay: Duration,
    pub outcome: Result<RiskAssessment, AssessError>,
}

impl Scripted {
    pub fn ok(delay: Duration, result: RiskAssessment) -> Self {
        Self {
            delay,
            outcome: Ok(result),
        }
    }

    pub fn err(delay: Duration, error: AssessError) -> Self {
        Self {
            delay,
            outcome: Err(error),
        }
    }
}

/// A scripted assessor for tests. Answers calls in order and records every request.
pub struct MockAssessor {
    script: Vec<Scripted>,
    index: AtomicUsize,
    requests: Mutex<Vec<AssessmentRequest>>,
}

impl MockAssessor {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<AssessmentRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Assessor for MockAssessor {
    async fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment, AssessError> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let scripted = self.script.get(i).cloned().ok_or_else(|| {
            AssessError::Transport(format!("MockAssessor: no more answers (called {} times)", i + 1))
        })?;
        tokio::time::sleep(scripted.delay).await;
        scripted.outcome
    }
}
