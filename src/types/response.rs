//! Response and streaming event types for RAG queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Citation pointing back into a source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Document ID
    pub document_id: Uuid,
    /// Source document name
    pub document_name: String,
    /// Index of the cited chunk within its document
    pub chunk_index: u32,
    /// Start offset of the chunk in the extracted text
    pub char_start: usize,
    /// End offset of the chunk in the extracted text
    pub char_end: usize,
    /// Page reference, "N/A" when the source has no page metadata
    pub page: String,
    /// Section reference, "N/A" when the source has no section metadata
    pub section: String,
    /// Bounded excerpt of the chunk text (at most 200 characters)
    pub excerpt: String,
    /// Cosine similarity between the query and the cited chunk
    pub similarity_score: f32,
}

/// Result of a blocking RAG query.
///
/// Always produced, even when retrieval comes back empty or the generator
/// fails; callers never need failure-specific branching on this path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer text
    pub answer: String,
    /// Citations in retrieval rank order
    pub citations: Vec<Citation>,
    /// Session the interaction belongs to, if any
    pub session_id: Option<String>,
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
    /// Rough token count of the answer
    pub token_count: u32,
}

/// Event emitted by the streaming query path.
///
/// Zero or more `Stream` events in generation order, followed by exactly one
/// `Complete` event. The terminal event is emitted even when retrieval,
/// embedding, or generation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Partial answer text
    Stream {
        /// Text fragment, in generation order
        content: String,
        /// Always false for partial events
        is_complete: bool,
    },
    /// Terminal event closing the stream
    Complete {
        /// Citations for the answer
        sources: Vec<Citation>,
        /// Session the interaction belongs to, if any
        session_id: Option<String>,
        /// Always true for the terminal event
        is_complete: bool,
        /// Present when the stream ended because of a failure
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl StreamEvent {
    /// Partial text event
    pub fn partial(content: impl Into<String>) -> Self {
        Self::Stream {
            content: content.into(),
            is_complete: false,
        }
    }

    /// Successful terminal event
    pub fn complete(sources: Vec<Citation>, session_id: Option<String>) -> Self {
        Self::Complete {
            sources,
            session_id,
            is_complete: true,
            error: None,
        }
    }

    /// Terminal event carrying a failure
    pub fn failed(error: impl Into<String>, session_id: Option<String>) -> Self {
        Self::Complete {
            sources: Vec::new(),
            session_id,
            is_complete: true,
            error: Some(error.into()),
        }
    }

    /// True for the terminal event
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_event_wire_shape() {
        let event = StreamEvent::partial("hello");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stream");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["is_complete"], false);

        let event = StreamEvent::complete(Vec::new(), Some("abc".to_string()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["is_complete"], true);
        assert!(json.get("error").is_none());

        let event = StreamEvent::failed("boom", None);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["error"], "boom");
    }
}
