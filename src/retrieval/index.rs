//! Per-owner chunk index with brute-force cosine ranking.
//!
//! The index is an explicit insert/remove/query object partitioned by owner,
//! so an approximate-nearest-neighbor structure can replace the linear scan
//! without touching callers. Vectors are held in their persisted encoding and
//! decoded per query; a chunk whose stored vector does not decode is skipped,
//! never fatal.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::embeddings::cosine_similarity;
use crate::error::Result;

/// Encode an embedding vector into its persisted representation.
///
/// Round-trips exactly: `decode_vector(&encode_vector(v)?) == v` for every
/// coordinate of any finite vector.
pub fn encode_vector(vector: &[f32]) -> Result<String> {
    Ok(serde_json::to_string(vector)?)
}

/// Decode a persisted embedding vector
pub fn decode_vector(encoded: &str) -> Result<Vec<f32>> {
    Ok(serde_json::from_str(encoded)?)
}

/// A chunk as stored in the index
#[derive(Debug, Clone)]
pub struct StoredChunk {
    /// Chunk ID
    pub chunk_id: Uuid,
    /// Owning document
    pub document_id: Uuid,
    /// Document name for citation display
    pub document_name: String,
    /// 0-based index within the document
    pub chunk_index: u32,
    /// Start offset into the extracted text
    pub char_start: usize,
    /// End offset into the extracted text
    pub char_end: usize,
    /// Chunk text
    pub text: String,
    /// Persisted embedding encoding
    pub encoded_embedding: String,
    /// Free-form metadata (page, section)
    pub metadata: HashMap<String, String>,
}

/// A retrieved chunk without its embedding
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub document_name: String,
    pub chunk_index: u32,
    pub char_start: usize,
    pub char_end: usize,
    pub text: String,
    pub metadata: HashMap<String, String>,
}

impl StoredChunk {
    /// Encode a domain chunk for storage in the index
    pub fn encode(document_name: &str, chunk: &crate::types::Chunk) -> Result<Self> {
        Ok(Self {
            chunk_id: chunk.id,
            document_id: chunk.document_id,
            document_name: document_name.to_string(),
            chunk_index: chunk.chunk_index,
            char_start: chunk.char_start,
            char_end: chunk.char_end,
            text: chunk.text.clone(),
            encoded_embedding: encode_vector(&chunk.embedding)?,
            metadata: chunk.metadata.clone(),
        })
    }
}

impl From<&StoredChunk> for RetrievedChunk {
    fn from(stored: &StoredChunk) -> Self {
        Self {
            chunk_id: stored.chunk_id,
            document_id: stored.document_id,
            document_name: stored.document_name.clone(),
            chunk_index: stored.chunk_index,
            char_start: stored.char_start,
            char_end: stored.char_end,
            text: stored.text.clone(),
            metadata: stored.metadata.clone(),
        }
    }
}

/// A ranked search hit
#[derive(Debug, Clone)]
pub struct ChunkMatch {
    /// The retrieved chunk
    pub chunk: RetrievedChunk,
    /// Cosine similarity against the query vector
    pub similarity: f32,
}

/// In-memory vector index partitioned by owner
#[derive(Default)]
pub struct ChunkIndex {
    owners: RwLock<HashMap<Uuid, Vec<StoredChunk>>>,
}

impl ChunkIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert all of a document's chunks under one owner.
    ///
    /// The batch is appended under a single write lock, so concurrent queries
    /// observe either none or all of the document's chunks.
    pub fn insert_document(&self, owner_id: Uuid, chunks: Vec<StoredChunk>) {
        if chunks.is_empty() {
            return;
        }
        let mut owners = self.owners.write();
        owners.entry(owner_id).or_default().extend(chunks);
    }

    /// Remove all chunks of a document, returning how many were dropped
    pub fn remove_document(&self, owner_id: Uuid, document_id: Uuid) -> usize {
        let mut owners = self.owners.write();
        let Some(chunks) = owners.get_mut(&owner_id) else {
            return 0;
        };

        let before = chunks.len();
        chunks.retain(|chunk| chunk.document_id != document_id);
        let removed = before - chunks.len();

        if chunks.is_empty() {
            owners.remove(&owner_id);
        }

        removed
    }

    /// Rank an owner's chunks against a query vector.
    ///
    /// Brute-force scan in insertion order; descending similarity with stable
    /// ties. Candidates whose stored vector fails to decode or whose
    /// dimensionality differs from the query are skipped and logged.
    /// `candidate_limit` restricts the scan to the most recently inserted
    /// chunks; `None` scans the owner's entire corpus.
    pub fn query(
        &self,
        owner_id: Uuid,
        query_vector: &[f32],
        top_k: usize,
        candidate_limit: Option<usize>,
    ) -> Vec<ChunkMatch> {
        if top_k == 0 {
            return Vec::new();
        }

        let owners = self.owners.read();
        let Some(chunks) = owners.get(&owner_id) else {
            return Vec::new();
        };

        let candidates = match candidate_limit {
            Some(limit) => &chunks[chunks.len().saturating_sub(limit)..],
            None => &chunks[..],
        };

        let mut matches: Vec<ChunkMatch> = Vec::with_capacity(candidates.len());

        for stored in candidates {
            let vector = match decode_vector(&stored.encoded_embedding) {
                Ok(vector) => vector,
                Err(e) => {
                    tracing::warn!(
                        chunk_id = %stored.chunk_id,
                        "Skipping chunk with undecodable embedding: {}",
                        e
                    );
                    continue;
                }
            };

            if vector.len() != query_vector.len() {
                tracing::warn!(
                    chunk_id = %stored.chunk_id,
                    "Skipping chunk with mismatched embedding dimensionality ({} vs {})",
                    vector.len(),
                    query_vector.len()
                );
                continue;
            }

            matches.push(ChunkMatch {
                chunk: RetrievedChunk::from(stored),
                similarity: cosine_similarity(query_vector, &vector),
            });
        }

        // Stable sort keeps insertion order on score ties
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);
        matches
    }

    /// Number of chunks indexed for an owner
    pub fn owner_chunk_count(&self, owner_id: Uuid) -> usize {
        self.owners
            .read()
            .get(&owner_id)
            .map(|chunks| chunks.len())
            .unwrap_or(0)
    }

    /// Total chunks across all owners
    pub fn len(&self) -> usize {
        self.owners.read().values().map(|chunks| chunks.len()).sum()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
