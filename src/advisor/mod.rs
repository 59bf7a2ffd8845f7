//! Advisory language-model seam.
//!
//! The engine never depends on an advisor being reachable: callers run their
//! alert checks first and use [`advise_or_fallback`] so a failed call turns
//! into a flagged fallback message instead of an error.

mod mock;
mod ollama;
pub mod prompts;

pub use mock::MockAdvisor;
pub use ollama::OllamaAdvisor;

use crate::config::AdvisorConfig;

/// Shown in place of advice when the advisor call fails.
pub const FALLBACK_MESSAGE: &str =
    "AI analysis is currently unavailable. Alerts above were computed locally and remain valid.";

/// Text-in, text-out advisory oracle. Possibly slow.
pub trait Advisor {
    fn advise(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<String, AdvisorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Cannot connect to Ollama at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("Ollama returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    ResponseParsing(String),
}

/// Advisor output, flagged when it is the fallback text.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub text: String,
    pub degraded: bool,
}

pub fn advise_or_fallback(
    advisor: &dyn Advisor,
    prompt: &str,
    system_prompt: Option<&str>,
    max_tokens: Option<u32>,
) -> Advice {
    match advisor.advise(prompt, system_prompt, max_tokens) {
        Ok(text) => Advice {
            text,
            degraded: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Advisor call failed, using fallback");
            Advice {
                text: FALLBACK_MESSAGE.to_string(),
                degraded: true,
            }
        }
    }
}

/// Demo advisor when mock mode is configured, Ollama otherwise.
pub fn build_advisor(config: &AdvisorConfig) -> Result<Box<dyn Advisor>, AdvisorError> {
    if config.mock {
        tracing::info!("Advisor running in demo mode");
        return Ok(Box::new(MockAdvisor::new()));
    }
    Ok(Box::new(OllamaAdvisor::new(config)?))
}
