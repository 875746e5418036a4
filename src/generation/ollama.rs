//! Ollama LLM client with retry logic for blocking generation

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::GenerationProvider;

/// Ollama generation client
pub struct OllamaGenerator {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct StreamChunk {
    response: String,
}

impl OllamaGenerator {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Check if the provider is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Generation request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::llm("unknown error")))
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.generate_model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("malformed generation response: {}", e)))?;

        Ok(parsed.response)
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!(model = %self.config.generate_model, "Generating answer");
        self.retry_request(|| self.generate_once(prompt)).await
    }

    async fn generate_stream(&self, prompt: &str) -> Result<BoxStream<'static, Result<String>>> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.generate_model.clone(),
            prompt: prompt.to_string(),
            stream: true,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("stream request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::llm(format!("stream failed: HTTP {}", response.status())));
        }

        // The provider emits NDJSON; each body chunk may carry several lines
        let stream = response.bytes_stream().map(|chunk| {
            let bytes = chunk.map_err(|e| Error::llm(format!("stream error: {}", e)))?;
            let text = String::from_utf8_lossy(&bytes);

            let mut output = String::new();
            for line in text.lines() {
                if let Ok(parsed) = serde_json::from_str::<StreamChunk>(line) {
                    output.push_str(&parsed.response);
                }
            }

            Ok(output)
        });

        Ok(stream.boxed())
    }
}
