pub mod http;
pub mod mock;

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::AssessError;
use crate::form::AssessmentRequest;

/// Membership degree per fuzzy category, e.g. `{"normal": 0.8, "sobrepeso": 0.2}`.
pub type FuzzyDegrees = BTreeMap<String, f64>;

/// What the risk service computes for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub bmi_value: f64,
    pub bmi_degrees: FuzzyDegrees,
    /// Weight classification, e.g. "Normal".
    pub category_label: String,
    /// Disease-risk description, e.g. "Bajo".
    pub risk_label: String,
    /// Numeric risk on a 1..10 scale.
    pub risk_score: f64,
    pub risk_degrees: FuzzyDegrees,
    pub recommendations: String,
}

/// The remote fuzzy-inference engine. Could be the HTTP service or a test script.
#[async_trait]
pub trait Assessor: Send + Sync {
    async fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment, AssessError>;
}
