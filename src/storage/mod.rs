//! Storage boundaries: document rows and uploaded file bytes.
//!
//! The pipeline only needs reliable status updates and readable bytes; the
//! engines behind these traits are swappable.

mod files;
mod memory;

pub use files::LocalFileStorage;
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Document, DocumentStatus};

/// Document row storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a newly uploaded document
    async fn insert(&self, document: Document) -> Result<()>;

    /// Fetch a document by ID
    async fn get(&self, id: Uuid) -> Result<Option<Document>>;

    /// List a user's documents
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Document>>;

    /// Update the lifecycle status
    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<()>;

    /// Transition to READY, stamping `processed_at` and the page count
    async fn mark_ready(
        &self,
        id: Uuid,
        processed_at: DateTime<Utc>,
        page_count: Option<u32>,
    ) -> Result<()>;

    /// Transition to FAILED with a human-readable reason
    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<()>;

    /// Delete a document row
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Readable byte storage for uploaded files
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Read the bytes behind a document's file reference
    async fn read(&self, file_ref: &str) -> Result<Vec<u8>>;
}
