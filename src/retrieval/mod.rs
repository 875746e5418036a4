//! Vector index and similarity search

mod index;
mod search;

pub use index::{decode_vector, encode_vector, ChunkIndex, ChunkMatch, RetrievedChunk, StoredChunk};
pub use search::SearchService;
