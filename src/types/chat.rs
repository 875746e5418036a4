//! Chat session and message records.
//!
//! Simple append-only shapes; the query orchestrator produces output that can
//! be persisted into these verbatim, but never writes them itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::response::{AnswerResponse, Citation};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    Ai,
}

/// A conversation container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_archived: bool,
}

impl ChatSession {
    /// Create a new session
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
            is_archived: false,
        }
    }
}

/// One turn in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender: SenderRole,
    pub content: String,
    /// Source citations, present on AI turns that were grounded in documents
    pub citations: Option<Vec<Citation>>,
    pub token_count: Option<u32>,
    pub response_time_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Record a user turn
    pub fn user_turn(session_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            sender: SenderRole::User,
            content: content.into(),
            citations: None,
            token_count: None,
            response_time_ms: None,
            created_at: Utc::now(),
        }
    }

    /// Record an AI turn from an answer response, verbatim
    pub fn ai_turn(session_id: Uuid, response: &AnswerResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            sender: SenderRole::Ai,
            content: response.answer.clone(),
            citations: Some(response.citations.clone()),
            token_count: Some(response.token_count),
            response_time_ms: Some(response.latency_ms),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_carries_no_answer_metadata() {
        let session = ChatSession::new(Uuid::new_v4(), "Rust questions");
        let message = ChatMessage::user_turn(session.id, "What is borrowing?");

        assert_eq!(message.sender, SenderRole::User);
        assert_eq!(message.content, "What is borrowing?");
        assert!(message.citations.is_none());
        assert!(message.token_count.is_none());
    }

    #[test]
    fn ai_turn_copies_the_response_verbatim() {
        let response = AnswerResponse {
            answer: "Borrowing lends access.".to_string(),
            citations: Vec::new(),
            session_id: None,
            latency_ms: 42,
            token_count: 6,
        };

        let message = ChatMessage::ai_turn(Uuid::new_v4(), &response);
        assert_eq!(message.sender, SenderRole::Ai);
        assert_eq!(message.content, response.answer);
        assert_eq!(message.citations.as_deref(), Some(&[][..]));
        assert_eq!(message.token_count, Some(6));
        assert_eq!(message.response_time_ms, Some(42));
    }
}
