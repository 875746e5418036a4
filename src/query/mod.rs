//! Query orchestration: retrieval, prompting, generation, and citations.
//!
//! Two entry points share the retrieval and prompt stage. The blocking path
//! always returns a result object; the streaming path always ends with
//! exactly one terminal event, even when retrieval, embedding, or generation
//! fails. Callers never need failure-specific branching.

mod citations;

pub use citations::build_citations;

use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use crate::generation::{GenerationProvider, PromptBuilder};
use crate::retrieval::SearchService;
use crate::types::{AnswerResponse, Citation, StreamEvent};

/// Answer framing when retrieval produced nothing to ground on
const NO_SOURCES_ANSWER: &str =
    "I couldn't find any relevant information in your documents to answer this question.";

/// Per-query options
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Session the interaction belongs to, passed through to the result
    pub session_id: Option<String>,
    /// Number of chunks to retrieve
    pub top_k: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            session_id: None,
            top_k: 6,
        }
    }
}

/// Orchestrates a single user query through the RAG pipeline
#[derive(Clone)]
pub struct QueryOrchestrator {
    search: SearchService,
    generator: Arc<dyn GenerationProvider>,
}

impl QueryOrchestrator {
    /// Create an orchestrator
    pub fn new(search: SearchService, generator: Arc<dyn GenerationProvider>) -> Self {
        Self { search, generator }
    }

    /// Answer a query in one shot.
    ///
    /// Generator failure substitutes a clearly-labeled fallback answer; this
    /// method never returns an error.
    pub async fn answer(
        &self,
        query: &str,
        owner_id: Uuid,
        options: QueryOptions,
    ) -> AnswerResponse {
        let start = Instant::now();

        let matches = self.search.search(query, owner_id, options.top_k).await;
        let citations = build_citations(&matches);

        let answer = if matches.is_empty() {
            NO_SOURCES_ANSWER.to_string()
        } else {
            let context = PromptBuilder::build_context(&matches);
            let prompt = PromptBuilder::build_answer_prompt(query, &context);

            match self.generator.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Generation failed, substituting fallback answer: {}", e);
                    fallback_answer(query)
                }
            }
        };

        let latency_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            owner_id = %owner_id,
            citations = citations.len(),
            latency_ms,
            "Query answered"
        );

        AnswerResponse {
            token_count: estimate_tokens(&answer),
            answer,
            citations,
            session_id: options.session_id,
            latency_ms,
        }
    }

    /// Answer a query as a lazy event stream.
    ///
    /// Zero or more `Stream` events in generation order, then exactly one
    /// `Complete` event. The terminal event is guaranteed structurally: the
    /// producer task computes it on every path and a single send site emits
    /// it, so no failure mode can leave the caller waiting. Dropping the
    /// receiver cancels forwarding and releases the provider stream.
    pub fn answer_stream(
        &self,
        query: &str,
        owner_id: Uuid,
        options: QueryOptions,
    ) -> ReceiverStream<StreamEvent> {
        let (tx, rx) = mpsc::channel(32);
        let orchestrator = self.clone();
        let query = query.to_string();

        tokio::spawn(async move {
            let terminal = orchestrator
                .stream_answer(&query, owner_id, options, &tx)
                .await;
            // Sole terminal send site. A send error means the receiver is
            // gone and nobody is waiting.
            let _ = tx.send(terminal).await;
        });

        ReceiverStream::new(rx)
    }

    /// Run the streaming pipeline, forwarding partial events and returning
    /// the terminal event for the caller to emit.
    async fn stream_answer(
        &self,
        query: &str,
        owner_id: Uuid,
        options: QueryOptions,
        tx: &mpsc::Sender<StreamEvent>,
    ) -> StreamEvent {
        let matches = self.search.search(query, owner_id, options.top_k).await;
        let citations = build_citations(&matches);
        let session_id = options.session_id;

        if matches.is_empty() {
            let _ = tx.send(StreamEvent::partial(NO_SOURCES_ANSWER)).await;
            return StreamEvent::complete(citations, session_id);
        }

        let context = PromptBuilder::build_context(&matches);
        let prompt = PromptBuilder::build_answer_prompt(query, &context);

        match self.generator.generate_stream(&prompt).await {
            Ok(mut fragments) => {
                while let Some(fragment) = fragments.next().await {
                    match fragment {
                        Ok(content) => {
                            if content.is_empty() {
                                continue;
                            }
                            if tx.send(StreamEvent::partial(content)).await.is_err() {
                                tracing::debug!(
                                    "Stream receiver dropped, stopping generation forwarding"
                                );
                                return StreamEvent::complete(citations, session_id);
                            }
                        }
                        Err(e) => {
                            // Forward nothing further; close with what arrived
                            tracing::error!("Generation stream error: {}", e);
                            return terminal_with_error(citations, session_id, e.to_string());
                        }
                    }
                }
                StreamEvent::complete(citations, session_id)
            }
            Err(e) => {
                tracing::error!("Generation failed, streaming fallback answer: {}", e);
                let _ = tx.send(StreamEvent::partial(fallback_answer(query))).await;
                StreamEvent::complete(citations, session_id)
            }
        }
    }
}

/// Clearly-labeled substitute when the generator is unavailable
fn fallback_answer(query: &str) -> String {
    format!(
        "The answer service is currently unavailable, so this reply is not grounded \
         in your documents. Your question was: \"{}\". Please try again shortly.",
        query
    )
}

/// Terminal event carrying both the collected sources and the failure
fn terminal_with_error(
    sources: Vec<Citation>,
    session_id: Option<String>,
    error: String,
) -> StreamEvent {
    StreamEvent::Complete {
        sources,
        session_id,
        is_complete: true,
        error: Some(error),
    }
}

/// Rough token estimate for chat persistence (about 4 characters per token)
fn estimate_tokens(text: &str) -> u32 {
    (text.chars().count() as u32).div_ceil(4)
}
