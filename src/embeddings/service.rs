//! Embedding service with separate strict and lenient failure policies.
//!
//! Ingestion and the user-facing query path disagree about what an embedding
//! failure means: ingestion must fail the document rather than store
//! zero vectors that would corrupt retrieval, while the query path must keep
//! answering rather than hang the caller. The two policies are separate
//! methods, never a shared flag.

use std::sync::Arc;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::EmbeddingProvider;

/// Embedding access point used by the ingestion and retrieval stages
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    dimensions: usize,
    batch_size: usize,
}

impl EmbeddingService {
    /// Create a service around a provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        Self {
            provider,
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
        }
    }

    /// Configured embedding dimensionality
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed a single text. Strict: propagates provider failure.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.provider.embed(text).await?;
        self.check_dimensions(&embedding)?;
        Ok(embedding)
    }

    /// Embed many texts, order-preserving, one vector per input.
    ///
    /// Strict: any provider failure or shape mismatch fails the whole batch.
    /// This is the ingestion policy; a document with partially embedded
    /// chunks must never reach READY.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let batch_embeddings = self.provider.embed_batch(batch).await?;

            if batch_embeddings.len() != batch.len() {
                return Err(Error::embedding(format!(
                    "provider returned {} embeddings for {} inputs",
                    batch_embeddings.len(),
                    batch.len()
                )));
            }

            for embedding in &batch_embeddings {
                self.check_dimensions(embedding)?;
            }

            embeddings.extend(batch_embeddings);
        }

        Ok(embeddings)
    }

    /// Embed a single text, degrading to the zero vector on failure.
    ///
    /// Lenient: this is the user-facing query policy. A zero vector scores
    /// 0.0 against everything, so the downstream pipeline stays alive and
    /// returns an answer with no sources instead of hanging the caller.
    pub async fn embed_or_zero(&self, text: &str) -> Vec<f32> {
        match self.embed(text).await {
            Ok(embedding) => embedding,
            Err(e) => {
                tracing::warn!("Embedding failed, degrading to zero vector: {}", e);
                vec![0.0; self.dimensions]
            }
        }
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "expected {} dimensions, provider returned {}",
                self.dimensions,
                embedding.len()
            )));
        }
        Ok(())
    }
}
