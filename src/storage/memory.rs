//! In-memory document store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Document, DocumentStatus};

use super::DocumentStore;

/// Document registry backed by a concurrent map
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<Uuid, Document>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn with_document<F>(&self, id: Uuid, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Document),
    {
        match self.documents.get_mut(&id) {
            Some(mut entry) => {
                mutate(entry.value_mut());
                Ok(())
            }
            None => Err(Error::DocumentNotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, document: Document) -> Result<()> {
        self.documents.insert(document.id, document);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Document>> {
        Ok(self.documents.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by_key(|doc| doc.uploaded_at);
        Ok(documents)
    }

    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<()> {
        self.with_document(id, |doc| {
            doc.status = status;
        })
    }

    async fn mark_ready(
        &self,
        id: Uuid,
        processed_at: DateTime<Utc>,
        page_count: Option<u32>,
    ) -> Result<()> {
        self.with_document(id, |doc| {
            doc.status = DocumentStatus::Ready;
            doc.processed_at = Some(processed_at);
            doc.failure_reason = None;
            if page_count.is_some() {
                doc.page_count = page_count;
            }
        })
    }

    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<()> {
        self.with_document(id, |doc| {
            doc.status = DocumentStatus::Failed;
            doc.failure_reason = Some(reason.to_string());
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.documents.remove(&id);
        Ok(())
    }
}
