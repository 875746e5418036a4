//! Configuration for the RAG pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main RAG pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// LLM configuration
    pub llm: LlmConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// File storage configuration
    pub storage: StorageConfig,
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Fraction of chunk_size carried over between adjacent chunks
    pub overlap_fraction: f32,
}

impl ChunkingConfig {
    /// Overlap size in characters, derived from the fraction
    pub fn overlap_size(&self) -> usize {
        (self.chunk_size as f32 * self.overlap_fraction) as usize
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            overlap_fraction: 0.1,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions, fixed per deployment
    pub dimensions: usize,
    /// Batch size for embedding generation during ingestion
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            batch_size: 32,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed blocking requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "command-r".to_string(),
            temperature: 0.3,
            timeout_secs: 300,
            max_retries: 3,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default number of chunks to retrieve per query
    pub top_k: usize,
    /// Optional cap on candidates scanned per query.
    ///
    /// `None` scans the owner's entire corpus. A bounded window is a
    /// scalability shortcut, not a product behavior.
    pub candidate_limit: Option<usize>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 6,
            candidate_limit: None,
        }
    }
}

/// File storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let upload_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docrag")
            .join("uploads");

        Self { upload_dir }
    }
}
