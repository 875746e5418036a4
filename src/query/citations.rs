//! Citation assembly from retrieved chunks

use std::collections::HashSet;

use crate::retrieval::ChunkMatch;
use crate::types::Citation;

/// Maximum excerpt length in characters
const MAX_EXCERPT_CHARS: usize = 200;

/// Rendered when a chunk carries no page/section metadata
const NOT_AVAILABLE: &str = "N/A";

/// Build citations from retrieved chunks, preserving rank order.
///
/// One citation per distinct chunk; exact repeats are dropped. Excerpts are
/// bounded and missing metadata renders as "N/A" rather than erroring.
pub fn build_citations(matches: &[ChunkMatch]) -> Vec<Citation> {
    let mut seen = HashSet::new();

    matches
        .iter()
        .filter(|m| seen.insert(m.chunk.chunk_id))
        .map(|m| Citation {
            document_id: m.chunk.document_id,
            document_name: m.chunk.document_name.clone(),
            chunk_index: m.chunk.chunk_index,
            char_start: m.chunk.char_start,
            char_end: m.chunk.char_end,
            page: metadata_or_na(m, "page"),
            section: metadata_or_na(m, "section"),
            excerpt: excerpt(&m.chunk.text),
            similarity_score: m.similarity,
        })
        .collect()
}

fn metadata_or_na(m: &ChunkMatch, key: &str) -> String {
    m.chunk
        .metadata
        .get(key)
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Bounded excerpt with an ellipsis marker when truncated
fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
    format!("{}...", truncated)
}
