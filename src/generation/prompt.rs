//! Prompt templates for grounded answer generation

use crate::retrieval::ChunkMatch;

/// Fixed system instruction for grounded answering
const SYSTEM_INSTRUCTION: &str = "\
You are an AI assistant that helps users find information in their documents.
Answer questions based only on the provided context from the user's documents.
Be concise and accurate, and cite the source document of information when possible.
If the answer is not in the provided context, say so clearly.";

/// Builds prompts from queries and retrieved chunks.
///
/// Pure and deterministic: no I/O, same inputs produce the same prompt.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block from retrieved chunks, each tagged with its
    /// source document name
    pub fn build_context(matches: &[ChunkMatch]) -> String {
        let mut context = String::new();

        for m in matches {
            context.push_str(&format!("Document: {}\n", m.chunk.document_name));
            context.push_str(&format!("Content: {}\n", m.chunk.text));
            context.push_str("---\n");
        }

        context
    }

    /// Build the full answer prompt: system instruction, context block, then
    /// the user's verbatim query
    pub fn build_answer_prompt(query: &str, context: &str) -> String {
        format!(
            "{system}\n\nContext from user's documents:\n{context}\n\nUser's question: {query}\n\nAnswer:",
            system = SYSTEM_INSTRUCTION,
            context = context,
            query = query,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::RetrievedChunk;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn chunk_match(name: &str, text: &str) -> ChunkMatch {
        ChunkMatch {
            chunk: RetrievedChunk {
                chunk_id: Uuid::new_v4(),
                document_id: Uuid::new_v4(),
                document_name: name.to_string(),
                chunk_index: 0,
                char_start: 0,
                char_end: text.len(),
                text: text.to_string(),
                metadata: HashMap::new(),
            },
            similarity: 0.9,
        }
    }

    #[test]
    fn context_tags_each_chunk_with_its_document() {
        let matches = vec![
            chunk_match("report.pdf", "First finding."),
            chunk_match("notes.txt", "Second finding."),
        ];

        let context = PromptBuilder::build_context(&matches);
        assert!(context.contains("Document: report.pdf"));
        assert!(context.contains("Content: First finding."));
        assert!(context.contains("Document: notes.txt"));
    }

    #[test]
    fn prompt_carries_the_verbatim_query() {
        let query = "What did the report conclude?  (v2)";
        let prompt = PromptBuilder::build_answer_prompt(query, "some context");

        assert!(prompt.contains(query));
        assert!(prompt.contains("some context"));
        assert!(prompt.contains("based only on the provided context"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let matches = vec![chunk_match("a.txt", "alpha")];
        let context = PromptBuilder::build_context(&matches);
        assert_eq!(
            PromptBuilder::build_answer_prompt("q", &context),
            PromptBuilder::build_answer_prompt("q", &context)
        );
    }
}
