//! Completion endpoint configuration and per-run walk options.

use crate::error::{FrontfillError, Result};

/// Model used when none is given on the command line.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Fixed sampling temperature for deterministic-leaning replies.
pub const TEMPERATURE: f32 = 0.0;

/// Public completion endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Configuration for the completion client.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Hosted text-completion model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Bearer token for the endpoint.
    pub api_key: String,
    /// Endpoint base URL (no trailing `/completions`).
    pub base_url: String,
}

impl CompletionConfig {
    /// Build a configuration from the environment.
    ///
    /// Requires `OPENAI_API_KEY`; honors `OPENAI_BASE_URL` when set.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(FrontfillError::Configuration(
                "model name must not be empty".to_string(),
            ));
        }

        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            FrontfillError::Configuration(format!("{API_KEY_VAR} is not set"))
        })?;

        let base_url =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            model,
            temperature: TEMPERATURE,
            api_key,
            base_url,
        })
    }
}

/// Which file kinds trigger synthesis during a walk.
///
/// With both flags off the run degrades to a pure mirror copy and never
/// touches the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Synthesize frontmatter for markdown posts.
    pub process_posts: bool,
    /// Synthesize frontmatter for `_index.md` folder files.
    pub process_index: bool,
}

impl WalkOptions {
    /// Whether this run needs a completion client at all.
    pub fn needs_client(&self) -> bool {
        self.process_posts || self.process_index
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            process_posts: true,
            process_index: true,
        }
    }
}
