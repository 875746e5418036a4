//! Document ingestion: extraction, chunking, and the processing state machine

mod chunker;
mod extract;
mod pipeline;

pub use chunker::{ChunkSpan, TextChunker};
pub use extract::{extract_text, ExtractedText};
pub use pipeline::IngestionPipeline;
