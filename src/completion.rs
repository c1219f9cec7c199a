//! Completion client: the outbound boundary to the text-completion model.

use crate::config::CompletionConfig;
use crate::error::{FrontfillError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Internal timeout for completion requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// User agent for frontfill requests.
pub const USER_AGENT: &str = "frontfill";

/// Reply length cap, matching the endpoint's conventional default.
const MAX_TOKENS: u32 = 256;

/// A text-completion service: one prompt in, one raw reply out.
///
/// Modeled as a passed-by-reference service object so tests can substitute
/// a stub.
pub trait CompletionClient {
    /// Send a rendered prompt and return the raw text reply.
    fn invoke(&self, prompt: &str) -> Result<String>;
}

/// Blocking client for an OpenAI-style `/completions` endpoint.
pub struct OpenAiCompletions {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiCompletions {
    /// Build a client from configuration.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

impl CompletionClient for OpenAiCompletions {
    fn invoke(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            temperature: self.config.temperature,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FrontfillError::Completion(format!(
                "completion endpoint returned {status}: {body}"
            )));
        }

        let reply: CompletionResponse = response.json()?;
        let choice = reply.choices.into_iter().next().ok_or_else(|| {
            FrontfillError::Completion("completion reply contained no choices".to_string())
        })?;

        Ok(choice.text)
    }
}
