//! Core types for the RAG pipeline

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatMessage, ChatSession, SenderRole};
pub use document::{Chunk, Document, DocumentStatus};
pub use response::{AnswerResponse, Citation, StreamEvent};
