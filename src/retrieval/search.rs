//! Similarity search over a user's corpus

use std::sync::Arc;
use uuid::Uuid;

use crate::config::RetrievalConfig;
use crate::embeddings::EmbeddingService;

use super::{ChunkIndex, ChunkMatch};

/// Embeds queries and ranks chunks against a user's corpus
#[derive(Clone)]
pub struct SearchService {
    embeddings: EmbeddingService,
    index: Arc<ChunkIndex>,
    candidate_limit: Option<usize>,
}

impl SearchService {
    /// Create a search service
    pub fn new(
        embeddings: EmbeddingService,
        index: Arc<ChunkIndex>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            embeddings,
            index,
            candidate_limit: config.candidate_limit,
        }
    }

    /// Return up to `top_k` of the owner's chunks ranked by similarity.
    ///
    /// Failure to embed the query degrades to an empty result set so the
    /// downstream answer pipeline stays alive with zero citations.
    pub async fn search(&self, query: &str, owner_id: Uuid, top_k: usize) -> Vec<ChunkMatch> {
        if top_k == 0 {
            return Vec::new();
        }

        let query_vector = match self.embeddings.embed(query).await {
            Ok(vector) => vector,
            Err(e) => {
                tracing::warn!("Query embedding failed, returning no matches: {}", e);
                return Vec::new();
            }
        };

        let matches = self
            .index
            .query(owner_id, &query_vector, top_k, self.candidate_limit);

        tracing::debug!(
            owner_id = %owner_id,
            matches = matches.len(),
            "Similarity search completed"
        );

        matches
    }
}
