//! Ingestion pipeline driving documents through their lifecycle.
//!
//! PENDING -> PROCESSING -> READY on success, FAILED on any error. Chunk
//! creation is all-or-nothing: nothing reaches the index unless every chunk
//! of the document extracted, chunked, and embedded successfully.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::embeddings::EmbeddingService;
use crate::error::{Error, Result};
use crate::retrieval::{ChunkIndex, StoredChunk};
use crate::storage::{DocumentStore, FileStorage};
use crate::types::{Chunk, Document, DocumentStatus};

use super::chunker::TextChunker;
use super::extract::extract_text;

/// Orchestrates extraction, chunking, embedding, and persistence for one
/// document at a time. Independent documents may be processed concurrently.
pub struct IngestionPipeline {
    documents: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStorage>,
    embeddings: EmbeddingService,
    index: Arc<ChunkIndex>,
    chunker: TextChunker,
}

impl IngestionPipeline {
    /// Create a pipeline
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        files: Arc<dyn FileStorage>,
        embeddings: EmbeddingService,
        index: Arc<ChunkIndex>,
        chunking: &ChunkingConfig,
    ) -> Self {
        Self {
            documents,
            files,
            embeddings,
            index,
            chunker: TextChunker::from_config(chunking),
        }
    }

    /// Process a document end to end.
    ///
    /// On success the document is READY with `processed_at` stamped and all
    /// chunks indexed; on any failure it is FAILED with a human-readable
    /// reason and zero chunks indexed. The error is also returned so callers
    /// can log it, but the terminal status is already written either way.
    pub async fn process(&self, document_id: Uuid) -> Result<()> {
        let document = self
            .documents
            .get(document_id)
            .await?
            .ok_or_else(|| Error::DocumentNotFound(document_id.to_string()))?;

        self.documents
            .update_status(document_id, DocumentStatus::Processing)
            .await?;

        tracing::info!(
            document_id = %document_id,
            filename = %document.filename,
            "Processing document"
        );

        match self.run(&document).await {
            Ok((chunk_count, page_count)) => {
                self.documents
                    .mark_ready(document_id, Utc::now(), page_count)
                    .await?;
                tracing::info!(
                    document_id = %document_id,
                    chunks = chunk_count,
                    "Document ready"
                );
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::error!(
                    document_id = %document_id,
                    "Document processing failed: {}",
                    reason
                );
                // The processing error is the one callers need; a failed
                // status write must not replace it.
                if let Err(status_err) = self.documents.mark_failed(document_id, &reason).await {
                    tracing::error!(
                        document_id = %document_id,
                        "Failed to record FAILED status: {}",
                        status_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Extraction through indexing. Returns (chunk count, page count).
    async fn run(&self, document: &Document) -> Result<(usize, Option<u32>)> {
        let data = self.files.read(&document.file_ref).await?;

        let extracted = extract_text(&document.filename, &data)?;
        if extracted.text.trim().is_empty() {
            return Err(Error::EmptyDocument(document.filename.clone()));
        }

        let spans = self.chunker.chunk(&extracted.text);
        let texts: Vec<String> = spans.iter().map(|span| span.text.clone()).collect();

        // Strict embedding: a provider failure fails the document. Storing
        // zero vectors here would silently corrupt every future retrieval
        // against this document.
        let vectors = self.embeddings.embed_batch(&texts).await?;

        let now = Utc::now();
        let chunks: Vec<Chunk> = spans
            .into_iter()
            .zip(vectors)
            .map(|(span, embedding)| {
                let mut metadata = HashMap::new();
                metadata.insert("source".to_string(), document.filename.clone());
                Chunk {
                    id: Uuid::new_v4(),
                    document_id: document.id,
                    text: span.text,
                    chunk_index: span.index,
                    char_start: span.char_start,
                    char_end: span.char_end,
                    embedding,
                    metadata,
                    created_at: now,
                }
            })
            .collect();

        // Encode everything before touching the index so a codec failure
        // leaves zero chunks behind; the insert itself is a single atomic
        // batch append.
        let stored: Vec<StoredChunk> = chunks
            .iter()
            .map(|chunk| StoredChunk::encode(&document.filename, chunk))
            .collect::<Result<_>>()?;

        let chunk_count = stored.len();
        self.index.insert_document(document.owner_id, stored);

        Ok((chunk_count, extracted.page_count))
    }

    /// Delete a document and cascade to its indexed chunks
    pub async fn delete_document(&self, document_id: Uuid) -> Result<usize> {
        let document = self
            .documents
            .get(document_id)
            .await?
            .ok_or_else(|| Error::DocumentNotFound(document_id.to_string()))?;

        let removed = self.index.remove_document(document.owner_id, document_id);
        self.documents.delete(document_id).await?;

        tracing::info!(
            document_id = %document_id,
            chunks_removed = removed,
            "Document deleted"
        );

        Ok(removed)
    }
}
