use std::time::Duration;

use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use premia_common::error::{PremiaError, PremiaResult};

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub body_type_project_id: String,
    pub make_project_id: String,
    pub prediction_key: String,
    pub timeout_secs: u64,
}

impl VisionConfig {
    /// Load classifier config from environment.
    ///
    /// Endpoint, key and both project ids are required: the classifier must
    /// be fully configured before the first request, so missing vars fail at
    /// startup rather than on the request path.
    pub fn from_env() -> PremiaResult<Self> {
        let timeout_secs = std::env::var("VISION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            endpoint: require("VISION_ENDPOINT")?,
            body_type_project_id: require("BODY_TYPE_PROJECT_ID")?,
            make_project_id: require("MAKE_PROJECT_ID")?,
            prediction_key: require("PREDICTION_KEY")?,
            timeout_secs,
        })
    }
}

fn require(key: &str) -> PremiaResult<String> {
    std::env::var(key).map_err(|_| PremiaError::Config(format!("{key} is required but not set")))
}

/// One tagged prediction from the classifier service.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    predictions: Vec<Prediction>,
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response contained no predictions")]
    NoPredictions,
}

#[derive(Clone)]
pub struct VisionClient {
    client: Client,
    config: VisionConfig,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// For testing: point the client at a specific base URL (e.g., wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.endpoint = format!("{base_url}/");
        self
    }

    pub async fn classify_body_type(&self, image: Bytes) -> Result<Prediction, VisionError> {
        self.classify(&self.config.body_type_project_id, "body_type", image)
            .await
    }

    pub async fn classify_make(&self, image: Bytes) -> Result<Prediction, VisionError> {
        self.classify(&self.config.make_project_id, "make", image)
            .await
    }

    /// Post raw image bytes to one classification project and return its top
    /// prediction. One attempt per call; failures are reported, not retried.
    async fn classify(
        &self,
        project_id: &str,
        iteration: &str,
        image: Bytes,
    ) -> Result<Prediction, VisionError> {
        let url = format!(
            "{}{}/classify/iterations/{}/image",
            self.config.endpoint, project_id, iteration
        );

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header("Prediction-Key", &self.config.prediction_key)
            .body(image)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, iteration, "classifier returned error");
            return Err(VisionError::Http { status, body });
        }

        let parsed: ClassifyResponse = response.json().await?;
        top_prediction(&parsed.predictions)
            .cloned()
            .ok_or(VisionError::NoPredictions)
    }
}

/// Top prediction: the maximum-probability element, ties broken by the
/// first-seen element. The upstream service happens to sort descending, but
/// that ordering is not part of its contract.
fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut best: Option<&Prediction> = None;
    for p in predictions {
        match best {
            Some(b) if p.probability <= b.probability => {}
            _ => best = Some(p),
        }
    }
    best
}
