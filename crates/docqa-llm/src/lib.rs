//! Ollama text generation over its local HTTP API.
//!
//! Failures are split the way the answer pipeline needs them: a runtime that
//! cannot be reached (refused connection, timeout) is
//! [`Error::GenerationUnavailable`]; every other failure, including HTTP error
//! statuses and malformed bodies, is [`Error::GenerationFailed`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use docqa_core::config::LlmSettings;
use docqa_core::traits::TextGenerator;
use docqa_core::types::GenerationOptions;
use docqa_core::{Error, Result};

const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
    num_ctx: u32,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_thread: Option<u32>,
}

impl From<&GenerationOptions> for OllamaOptions {
    fn from(o: &GenerationOptions) -> Self {
        Self {
            temperature: o.temperature,
            top_p: o.top_p,
            top_k: o.top_k,
            num_predict: o.max_output_tokens,
            num_ctx: o.context_window,
            repeat_penalty: o.repeat_penalty,
            num_thread: o.threads,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(AVAILABILITY_TIMEOUT)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), model: model.to_string() })
    }

    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        Self::new(&settings.base_url, &settings.model, settings.timeout())
    }

    pub fn model(&self) -> &str { &self.model }

    fn unavailable(&self, e: &reqwest::Error) -> Error {
        Error::GenerationUnavailable(format!("Ollama is not reachable at {}: {e}", self.base_url))
    }
}

fn request_body<'a>(model: &'a str, prompt: &'a str, options: &GenerationOptions) -> GenerateRequest<'a> {
    GenerateRequest { model, prompt, stream: false, options: options.into() }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "generate");
        let response = self
            .http
            .post(&url)
            .json(&request_body(&self.model, prompt, options))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    self.unavailable(&e)
                } else {
                    Error::GenerationFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "generation request rejected");
            return Err(Error::GenerationFailed(format!("HTTP {status}: {}", body.trim())));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.unavailable(&e)
            } else {
                Error::GenerationFailed(format!("unexpected response body: {e}"))
            }
        })?;
        Ok(parsed.response)
    }

    async fn is_available(&self) -> bool {
        self.http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(AVAILABILITY_TIMEOUT)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}
