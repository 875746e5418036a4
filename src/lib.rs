//! # docrag
//!
//! Document ingestion and retrieval-augmented answering pipeline.
//!
//! Users upload documents, the ingestion pipeline splits them into
//! embeddable, offset-tracked chunks, and the query orchestrator answers
//! natural-language questions grounded in those chunks, either as one
//! completed answer or as an incremental event stream that always closes
//! with a terminal event.
//!
//! ## Components
//!
//! - [`ingestion`]: text extraction (PDF/DOCX/TXT), sentence-aligned
//!   chunking with overlap, and the PENDING → PROCESSING → READY/FAILED
//!   state machine.
//! - [`embeddings`]: provider trait, Ollama-backed implementation, cosine
//!   similarity, and the strict/lenient failure policies.
//! - [`retrieval`]: per-owner chunk index and similarity search.
//! - [`generation`]: generation provider trait, Ollama client, prompt
//!   construction.
//! - [`query`]: blocking and streaming query orchestration with citation
//!   assembly.
//! - [`storage`]: document-row and file-byte boundaries with in-memory and
//!   local-disk implementations.
//!
//! ## Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use docrag::config::RagConfig;
//! use docrag::embeddings::{EmbeddingService, OllamaEmbedder};
//! use docrag::generation::OllamaGenerator;
//! use docrag::ingestion::IngestionPipeline;
//! use docrag::query::QueryOrchestrator;
//! use docrag::retrieval::{ChunkIndex, SearchService};
//! use docrag::storage::{LocalFileStorage, MemoryDocumentStore};
//!
//! # fn main() -> docrag::Result<()> {
//! let config = RagConfig::default();
//!
//! let documents = Arc::new(MemoryDocumentStore::new());
//! let files = Arc::new(LocalFileStorage::new(&config.storage.upload_dir));
//! let index = Arc::new(ChunkIndex::new());
//!
//! let embedder = Arc::new(OllamaEmbedder::new(&config.llm, &config.embeddings)?);
//! let embeddings = EmbeddingService::new(embedder, &config.embeddings);
//!
//! let pipeline = IngestionPipeline::new(
//!     documents.clone(),
//!     files,
//!     embeddings.clone(),
//!     index.clone(),
//!     &config.chunking,
//! );
//!
//! let search = SearchService::new(embeddings, index, &config.retrieval);
//! let generator = Arc::new(OllamaGenerator::new(&config.llm)?);
//! let orchestrator = QueryOrchestrator::new(search, generator);
//! # let _ = (pipeline, orchestrator);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod query;
pub mod retrieval;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use query::{QueryOptions, QueryOrchestrator};
pub use types::{AnswerResponse, Citation, Document, DocumentStatus, StreamEvent};

/// Initialize tracing with an env-filter subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` for this crate. Safe to call once
/// at startup; returns quietly if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docrag=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
