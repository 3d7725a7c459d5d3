//! HTTP client for the remote scoring service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::ScoringConfig;
use crate::domain::{fallback_recommendation, Answers, Recommendation, ScoringClient, ScoringError};

/// Body of the service's connection check route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
    pub message: String,
}

/// Posts answers as JSON to the predict endpoint.
///
/// Any failure is logged and replaced by the fallback recommendation after
/// the configured delay.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    endpoint: String,
    health_endpoint: String,
    fallback_delay: Duration,
}

impl HttpScoringClient {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ScoringError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            health_endpoint: config.health_url(),
            fallback_delay: config.fallback_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_recommendation(&self, answers: &Answers) -> Result<Recommendation, ScoringError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(answers)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Asks the service's connection check route whether it is up.
    pub async fn check_connection(&self) -> Result<ConnectionStatus, ScoringError> {
        let response = self.client.get(&self.health_endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn fetch_recommendation(&self, answers: &Answers) -> Recommendation {
        match self.request_recommendation(answers).await {
            Ok(recommendation) => {
                debug!(winner = %recommendation.winner, score = recommendation.score, "scoring succeeded");
                recommendation
            }
            Err(error) => {
                warn!(endpoint = %self.endpoint, %error, "scoring failed, using fallback recommendation");
                sleep(self.fallback_delay).await;
                fallback_recommendation()
            }
        }
    }
}
