//! Shared mock providers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use std::sync::Arc;

use docrag::config::EmbeddingConfig;
use docrag::embeddings::{EmbeddingProvider, EmbeddingService};
use docrag::error::{Error, Result};
use docrag::generation::GenerationProvider;

/// Embedding dimensionality used by all mock providers
pub const DIMS: usize = 4;

/// Deterministic embedder keyed on topic keywords.
///
/// Texts about the same topic land on the same axis, so similarity ranking
/// in tests is predictable without a real model.
pub struct KeywordEmbedder;

fn topic_vector(text: &str) -> Vec<f32> {
    let text = text.to_lowercase();
    let mut vector = vec![0.0f32; DIMS];
    if text.contains("ownership") {
        vector[0] = 1.0;
    }
    if text.contains("garbage") {
        vector[1] = 1.0;
    }
    if text.contains("async") {
        vector[2] = 1.0;
    }
    // Keeps every vector off the origin so cosine similarity is defined
    vector[3] = 0.1;
    vector
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(topic_vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| topic_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model_name(&self) -> &str {
        "keyword-mock"
    }
}

/// Embedder that always fails, standing in for an unreachable provider
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::embedding("mock provider offline"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(Error::embedding("mock provider offline"))
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model_name(&self) -> &str {
        "failing-mock"
    }
}

/// Embedding config matching the mock providers
pub fn mock_embedding_config() -> EmbeddingConfig {
    EmbeddingConfig {
        model: "keyword-mock".to_string(),
        dimensions: DIMS,
        batch_size: 2,
    }
}

/// Embedding service over any mock provider
pub fn mock_embeddings(provider: Arc<dyn EmbeddingProvider>) -> EmbeddingService {
    EmbeddingService::new(provider, &mock_embedding_config())
}

/// Generator that replays a scripted answer and stream fragments
pub struct ScriptedGenerator {
    pub answer: String,
    pub fragments: Vec<String>,
}

impl ScriptedGenerator {
    pub fn new(answer: impl Into<String>, fragments: &[&str]) -> Self {
        Self {
            answer: answer.into(),
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[async_trait]
impl GenerationProvider for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.answer.clone())
    }

    async fn generate_stream(&self, _prompt: &str) -> Result<BoxStream<'static, Result<String>>> {
        let fragments: Vec<Result<String>> =
            self.fragments.iter().cloned().map(Ok).collect();
        Ok(stream::iter(fragments).boxed())
    }
}

/// Generator that always fails, standing in for an unreachable model
pub struct FailingGenerator;

#[async_trait]
impl GenerationProvider for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::llm("mock generator down"))
    }

    async fn generate_stream(&self, _prompt: &str) -> Result<BoxStream<'static, Result<String>>> {
        Err(Error::llm("mock generator down"))
    }
}

/// Generator whose stream yields some text, then dies mid-flight
pub struct MidStreamFailingGenerator;

#[async_trait]
impl GenerationProvider for MidStreamFailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::llm("mock generator down"))
    }

    async fn generate_stream(&self, _prompt: &str) -> Result<BoxStream<'static, Result<String>>> {
        let fragments: Vec<Result<String>> = vec![
            Ok("The answer ".to_string()),
            Err(Error::llm("connection reset")),
        ];
        Ok(stream::iter(fragments).boxed())
    }
}
