//! Answer generation providers and prompt construction

mod ollama;
mod prompt;

pub use ollama::OllamaGenerator;
pub use prompt::PromptBuilder;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::Result;

/// Provider that turns a prompt into answer text.
///
/// Black box at the boundary: the pipeline owns prompt construction and
/// result shaping, the provider owns the model and its wire protocol.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a complete answer
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate an answer as a lazy sequence of text fragments, in
    /// generation order
    async fn generate_stream(&self, prompt: &str) -> Result<BoxStream<'static, Result<String>>>;
}
