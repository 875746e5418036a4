//! Document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lifecycle status of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Uploaded, not yet picked up for processing
    Pending,
    /// Ingestion pipeline is working on it
    Processing,
    /// All chunks created and queryable
    Ready,
    /// Terminal failure; see `failure_reason`
    Failed,
}

/// An uploaded document owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    /// Original filename, used for extension-keyed extraction and citations
    pub filename: String,
    /// Reference into the file storage layer
    pub file_ref: String,
    /// File size in bytes
    pub file_size: u64,
    /// MIME type reported at upload
    pub mime_type: Option<String>,
    /// Page count, filled in during processing when the format has pages
    pub page_count: Option<u32>,
    /// Lifecycle status
    pub status: DocumentStatus,
    /// Human-readable reason for a FAILED status
    pub failure_reason: Option<String>,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
    /// Set only on the transition to READY
    pub processed_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a new document in PENDING state
    pub fn new(
        owner_id: Uuid,
        filename: impl Into<String>,
        file_ref: impl Into<String>,
        file_size: u64,
        mime_type: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            filename: filename.into(),
            file_ref: file_ref.into(),
            file_size,
            mime_type,
            page_count: None,
            status: DocumentStatus::Pending,
            failure_reason: None,
            uploaded_at: Utc::now(),
            processed_at: None,
        }
    }
}

/// A bounded, offset-tracked segment of a document's extracted text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk ID
    pub id: Uuid,
    /// Owning document
    pub document_id: Uuid,
    /// Chunk text
    pub text: String,
    /// 0-based, contiguous per document
    pub chunk_index: u32,
    /// Start offset into the extracted text
    pub char_start: usize,
    /// End offset into the extracted text (exclusive, > char_start)
    pub char_end: usize,
    /// Embedding vector, fixed dimensionality per deployment
    pub embedding: Vec<f32>,
    /// Free-form metadata (page, section, source path)
    pub metadata: HashMap<String, String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
