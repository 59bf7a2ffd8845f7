use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Advisor, AdvisorError};
use crate::config::AdvisorConfig;

/// Used when the caller gives no token limit.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Blocking Ollama client for `/api/generate`.
pub struct OllamaAdvisor {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaAdvisor {
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl Advisor for OllamaAdvisor {
    fn advise(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<String, AdvisorError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system: system_prompt.filter(|s| !s.is_empty()),
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AdvisorError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AdvisorError::Timeout(self.timeout_secs)
                } else {
                    AdvisorError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AdvisorError::ResponseParsing(e.to_string()))?;

        tracing::debug!(model = %self.model, chars = parsed.response.len(), "Advisor replied");
        Ok(parsed.response.trim().to_string())
    }
}
