//! Summarizer backed by the remote generation endpoint

use super::client::{Summarizer, SummaryError};
use super::wire::{GenerateRequest, GenerateResponse};
use crate::config::SummaryConfig;
use crate::display::truncate_with_ellipsis;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate summary";

/// Summarizer that calls the remote generation service over HTTP.
///
/// Each call first checks the credential against the models-listing
/// endpoint, then posts one generation request. No timeout is imposed
/// beyond what the HTTP client itself applies.
pub struct GeminiClient {
    http: Client,
    config: SummaryConfig,
}

impl GeminiClient {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    async fn check_credentials(&self) -> Result<(), SummaryError> {
        debug!(url = %self.config.models_url, "validating API key");
        let response = self
            .http
            .get(&self.config.models_url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, "API key check could not reach the service");
                SummaryError::Authentication("service unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "API key check rejected");
            return Err(SummaryError::Authentication(format!(
                "key check returned {}",
                status.as_u16()
            )));
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        let request = GenerateRequest::new(prompt, &self.config.generation);
        let response = self
            .http
            .post(&self.config.generate_url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SummaryError::RemoteService {
                status: None,
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "generation response received");
        let body = response.text().await.map_err(|e| SummaryError::RemoteService {
            status: Some(status.as_u16()),
            message: e.without_url().to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            return Err(SummaryError::RemoteService {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| SummaryError::RemoteService {
                status: Some(status.as_u16()),
                message: format!("unreadable response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(SummaryError::RemoteService {
                status: error.code.and_then(|c| u16::try_from(c).ok()),
                message: error.message,
            });
        }

        if !parsed.has_candidates() {
            return Err(SummaryError::EmptyResult);
        }

        let text = parsed.first_text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(SummaryError::EmptyResult);
        }
        Ok(text.chars().take(self.config.max_summary_chars).collect())
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let input = truncate_with_ellipsis(text, self.config.max_input_chars);
        let prompt = build_prompt(&input);

        self.check_credentials().await?;
        self.generate(&prompt).await
    }
}

fn build_prompt(passage: &str) -> String {
    format!(
        "Please provide a concise summary of the following text in 2-3 sentences. \
         Focus on the key points and main ideas:\n\n\"{}\"",
        passage
    )
}
