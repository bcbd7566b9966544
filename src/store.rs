//! The result currently on screen, plus the last failure if any.

use crate::assessor::RiskAssessment;
use crate::error::ErrorKind;

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    current: Option<RiskAssessment>,
    last_error: Option<ErrorKind>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current result and clear any error flag.
    pub fn publish(&mut self, result: RiskAssessment) {
        self.current = Some(result);
        self.last_error = None;
    }

    /// Flag a failure. The current result, if any, stays visible.
    pub fn publish_error(&mut self, kind: ErrorKind) {
        self.last_error = Some(kind);
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.last_error = None;
    }

    pub fn current(&self) -> Option<&RiskAssessment> {
        self.current.as_ref()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result(bmi: f64) -> RiskAssessment {
        RiskAssessment {
            bmi_value: bmi,
            bmi_degrees: BTreeMap::new(),
            category_label: "Normal".to_string(),
            risk_label: "Bajo".to_string(),
            risk_score: 2.0,
            risk_degrees: BTreeMap::new(),
            recommendations: String::new(),
        }
    }

    #[test]
    fn starts_empty() {
        let store = ResultStore::new();
        assert!(store.current().is_none());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn publish_error_keeps_current_result() {
        let mut store = ResultStore::new();
        store.publish(result(24.2));
        store.publish_error(ErrorKind::Transport);
        assert_eq!(store.current().map(|r| r.bmi_value), Some(24.2));
        assert_eq!(store.last_error(), Some(ErrorKind::Transport));
    }

    #[test]
    fn publish_clears_error() {
        let mut store = ResultStore::new();
        store.publish_error(ErrorKind::Timeout);
        store.publish(result(30.1));
        assert!(store.last_error().is_none());
        assert_eq!(store.current().map(|r| r.bmi_value), Some(30.1));
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = ResultStore::new();
        store.publish(result(24.2));
        store.publish_error(ErrorKind::Malformed);
        store.clear();
        assert!(store.current().is_none());
        assert!(store.last_error().is_none());
    }
}
