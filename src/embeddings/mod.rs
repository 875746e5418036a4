//! Embedding providers and similarity computation

mod ollama;
mod service;

pub use ollama::OllamaEmbedder;
pub use service::EmbeddingService;

use async_trait::async_trait;

use crate::error::Result;

/// Provider that maps text to fixed-length vectors.
///
/// Treated as a black box: it either returns one equal-length vector per
/// input, or fails. Callers decide what failure means at their call site.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for a batch of texts, order-preserving
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimensionality of produced embeddings
    fn dimensions(&self) -> usize;

    /// Model name
    fn model_name(&self) -> &str;
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm or the lengths differ;
/// similarity between mismatched spaces is undefined and must fail closed.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let a = vec![1.0, 2.0, -3.0];
        let b = vec![-0.5, 4.0, 1.5];

        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);

        assert_eq!(ab, ba);
        assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn identical_vectors_have_unit_similarity() {
        let a = vec![0.3, 0.7, 0.1];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_yields_zero() {
        let zero = vec![0.0; 4];
        let other = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&other, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn mismatched_lengths_yield_zero() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn opposite_vectors_approach_negative_one() {
        let a = vec![1.0, 1.0];
        let b = vec![-1.0, -1.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6);
    }
}
