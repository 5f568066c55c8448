//! Ollama-style completion service client.
//!
//! One prompt in, one generated text out. Single attempt, bounded by the
//! configured timeout; any non-200 status or transport failure comes back
//! as a typed [`ServiceError`], never a panic.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Runtime;
use url::Url;

use crate::error::ServiceError;

/// Completion-service parameters. Everything has a usable default so the
/// client works against a local Ollama out of the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    "llama3.2:3b".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_top_p() -> f64 {
    0.9
}
fn default_max_tokens() -> u32 {
    500
}
fn default_timeout() -> u64 {
    30
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Synchronous client over the async HTTP stack; the public API stays
/// blocking per the single-threaded request-per-invocation model.
pub struct CompletionClient {
    config: CompletionConfig,
    runtime: Runtime,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, ServiceError> {
        Url::parse(&config.base_url).map_err(|e| ServiceError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ServiceError::Runtime(e.to_string()))?;

        Ok(CompletionClient { config, runtime })
    }

    /// Send one prompt and return the generated text.
    pub fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/api/generate",
            self.config.base_url.trim_end_matches('/')
        );
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                max_tokens: self.config.max_tokens,
            },
        };
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let timeout_secs = self.config.timeout_secs;

        self.runtime.block_on(async {
            let client = reqwest::Client::new();
            let response = client
                .post(&url)
                .timeout(timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        ServiceError::Timeout { timeout_secs }
                    } else {
                        ServiceError::Transport(e.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(ServiceError::Status {
                    status: response.status().as_u16(),
                });
            }

            let parsed: GenerateResponse = response
                .json()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))?;
            Ok(parsed.response)
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}
