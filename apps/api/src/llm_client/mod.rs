/// LLM client: the single point of entry for all model calls.
///
/// Talks to an Ollama-compatible `/api/generate` endpoint, either a local
/// Ollama daemon or a hosted deployment behind a bearer key.
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_STEP_MS: u64 = 800;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    images: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// The single LLM client shared by the assistant and OCR paths.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    vision_model: String,
}

impl LlmClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        vision_model: String,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            vision_model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Text completion with the default model.
    pub async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.send(&self.model, prompt, system, None, &[]).await
    }

    /// Completion constrained to JSON output, deserialized into `T`.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self
            .send(&self.model, prompt, system, Some("json"), &[])
            .await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    /// Completion with base64-encoded images attached, using the vision model.
    pub async fn describe_images(
        &self,
        prompt: &str,
        system: &str,
        images_b64: &[String],
    ) -> Result<String, LlmError> {
        self.send(&self.vision_model, prompt, system, None, images_b64)
            .await
    }

    /// Retries transport errors, 429 and 5xx with linear backoff (800ms × attempt).
    async fn send(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
        format: Option<&str>,
        images: &[String],
    ) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
            format,
            images,
        };
        let url = format!("{}/api/generate", self.base_url);

        let mut last_error: Option<LlmError> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            if attempt > 1 {
                let delay = backoff_delay(attempt - 1);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt - 1,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<OllamaError>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;

            debug!(
                "LLM call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                model, generated.prompt_eval_count, generated.eval_count
            );

            if generated.response.trim().is_empty() {
                return Err(LlmError::EmptyContent);
            }
            return Ok(generated.response);
        }

        if let Some(e) = last_error {
            warn!("LLM call failed after {MAX_ATTEMPTS} attempts: {e}");
        }
        Err(LlmError::Exhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_STEP_MS * attempt as u64)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
