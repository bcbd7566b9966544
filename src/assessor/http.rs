use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{Assessor, FuzzyDegrees, RiskAssessment};
use crate::consts::RIESGO_PATH;
use crate::error::AssessError;
use crate::form::AssessmentRequest;

const USER_AGENT: &str = concat!("difuso/", env!("CARGO_PKG_VERSION"));

/// Calls the fuzzy risk service over HTTP: `POST {base}/riesgo`.
#[derive(Debug, Clone)]
pub struct HttpAssessor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAssessor {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_response(text: &str) -> Result<RiskAssessment, AssessError> {
        let api: ApiResponse =
            serde_json::from_str(text).map_err(|e| AssessError::Malformed(e.to_string()))?;
        Ok(api.into())
    }
}

fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), RIESGO_PATH)
}

#[async_trait]
impl Assessor for HttpAssessor {
    async fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment, AssessError> {
        debug!(endpoint = %self.endpoint, ?request, "posting assessment request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AssessError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AssessError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AssessError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Self::parse_response(&text)
    }
}

// --- API types ---

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(rename = "IMCValue")]
    imc_value: f64,
    #[serde(rename = "IMCDifuso")]
    imc_difuso: FuzzyDegrees,
    #[serde(rename = "MainDescription")]
    main_description: String,
    #[serde(rename = "RiskDescription")]
    risk_description: String,
    #[serde(rename = "MainRisk")]
    main_risk: f64,
    #[serde(rename = "RiesgoDifuso")]
    riesgo_difuso: FuzzyDegrees,
    #[serde(rename = "Recomendaciones")]
    recomendaciones: String,
}

impl From<ApiResponse> for RiskAssessment {
    fn from(api: ApiResponse) -> Self {
        Self {
            bmi_value: api.imc_value,
            bmi_degrees: api.imc_difuso,
            category_label: api.main_description,
            risk_label: api.risk_description,
            risk_score: api.main_risk,
            risk_degrees: api.riesgo_difuso,
            recommendations: api.recomendaciones,
        }
    }
}
