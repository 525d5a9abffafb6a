use super::types::*;
use crate::{Error, Result, config::ServiceConfig};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait SentimentService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}

pub struct HttpSentimentClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSentimentClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created sentiment client for: {}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentService for HttpSentimentClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        debug!(
            "Posting {} characters to {}",
            request.text().chars().count(),
            self.endpoint
        );

        // `.json` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = AnalysisError::from_body(&body);
            if let Some(ref code) = error.error {
                warn!("Sentiment service returned {}: {}", status, code);
            }
            return Err(Error::service(status.as_u16(), error.user_message()));
        }

        let analysis: AnalysisResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::parse(format!("Invalid analysis response: {}", e)))?;

        debug!(
            "Received sentiment {} with {} scores",
            analysis.sentiment,
            analysis.confidence_scores.len()
        );

        Ok(analysis)
    }
}
