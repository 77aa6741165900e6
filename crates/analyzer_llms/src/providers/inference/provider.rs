//! Inference provider implementation

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::convert::{api_error_payload, from_chat_response, to_chat_request};
use super::types::{ChatCompletionResponse, InferenceConfig};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// OpenAI-compatible chat-completions provider
pub struct InferenceProvider {
    config: InferenceConfig,
    client: Client,
}

impl InferenceProvider {
    /// Create a new provider. An empty credential is rejected.
    pub fn new(config: InferenceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("inference".to_string()));
        }
        if config.base_url.is_empty() {
            return Err(Error::Config("inference base URL is empty".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    async fn send(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = to_chat_request(&request);
        let headers = self.build_headers(request.options.headers.as_ref());

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::api(status.as_u16(), api_error_payload(&text)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidResponse(format!("{e}: {text}")))?;
        Ok(from_chat_response(parsed))
    }
}

#[async_trait]
impl Provider for InferenceProvider {
    fn provider_id(&self) -> &str {
        "inference"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerateResponse> {
        let deadline = request
            .options
            .deadline
            .unwrap_or(self.config.default_deadline);
        let started = Instant::now();
        tracing::debug!(
            provider = self.provider_id(),
            model = %request.model,
            max_tokens = ?request.options.max_tokens,
            deadline_secs = deadline.as_secs_f64(),
            "Sending chat completion"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            outcome = tokio::time::timeout(deadline, self.send(request)) => {
                outcome.unwrap_or(Err(Error::Timeout(deadline)))
            }
        };

        match &result {
            Ok(resp) => tracing::debug!(
                provider = self.provider_id(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                chars = resp.content.len(),
                "Chat completion finished"
            ),
            Err(e) => tracing::debug!(
                provider = self.provider_id(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Chat completion failed"
            ),
        }
        result
    }
}
