//! Sentence-aligned text chunking with overlap

use regex::Regex;

use crate::config::ChunkingConfig;

/// A chunk of text with stable offsets into the original
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSpan {
    /// Chunk text, trimmed of surrounding whitespace
    pub text: String,
    /// 0-based sequence index
    pub index: u32,
    /// Start offset into the original text
    pub char_start: usize,
    /// End offset into the original text (exclusive)
    pub char_end: usize,
}

/// Splits text into overlapping, sentence-aligned chunks.
///
/// Pure function over the input text: deterministic, restartable, no I/O.
pub struct TextChunker {
    chunk_size: usize,
    overlap_size: usize,
    sentence_boundary: Regex,
}

impl TextChunker {
    /// Create a chunker with explicit sizes. Overlap is clamped below the
    /// chunk size so offsets always advance.
    pub fn new(chunk_size: usize, overlap_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap_size: overlap_size.min(chunk_size - 1),
            // Sentence boundary: terminal punctuation followed by whitespace.
            // The regex is a literal pattern; construction cannot fail.
            sentence_boundary: Regex::new(r"[.!?]+\s+").expect("valid sentence boundary regex"),
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.overlap_size())
    }

    /// Split text into chunks.
    ///
    /// Sentences are accumulated greedily until the next one would push the
    /// buffer past `chunk_size`; the buffer is then emitted and the trailing
    /// `overlap_size` characters are carried into the next buffer. Offsets
    /// account for the carry-over, so each chunk's `[char_start, char_end)`
    /// points at its exact span in the original text. Empty or
    /// whitespace-only input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<ChunkSpan> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut char_start = 0usize;
        let mut index = 0u32;

        for sentence in self.split_sentences(text) {
            if current.len() + sentence.len() > self.chunk_size && !current.is_empty() {
                let emitted_len = current.len();
                chunks.push(ChunkSpan {
                    text: current.trim().to_string(),
                    index,
                    char_start,
                    char_end: char_start + emitted_len,
                });

                // Seed the next buffer with the tail of the emitted one. The
                // cut must land on a char boundary or the carry would split a
                // multi-byte character.
                let carry_from =
                    snap_to_char_boundary(&current, emitted_len.saturating_sub(self.overlap_size));
                current = current[carry_from..].to_string();
                char_start += carry_from;
                index += 1;
            }

            current.push_str(sentence);
        }

        if !current.trim().is_empty() {
            chunks.push(ChunkSpan {
                text: current.trim().to_string(),
                index,
                char_start,
                char_end: char_start + current.len(),
            });
        }

        chunks
    }

    /// Split text into sentences, keeping terminal punctuation and the
    /// whitespace that follows it attached to each sentence.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.sentence_boundary.find_iter(text) {
            sentences.push(&text[start..boundary.end()]);
            start = boundary.end();
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
    }
}

/// Walk an offset down to the nearest char boundary
fn snap_to_char_boundary(s: &str, mut offset: usize) -> usize {
    while offset > 0 && !s.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(count: usize, words_per_sentence: usize) -> String {
        (0..count)
            .map(|i| {
                let words = vec![format!("word{}", i); words_per_sentence];
                format!("{}.", words.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(512, 51);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t  ").is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = TextChunker::new(512, 51);
        let text = "One sentence. Another one.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].char_start, 0);
        assert_eq!(chunks[0].char_end, text.len());
    }

    #[test]
    fn indices_are_contiguous_and_offsets_cover_the_text() {
        let chunker = TextChunker::new(200, 20);
        let text = sentences(30, 6);
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() > 1);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i as u32);
            assert!(chunk.char_start < chunk.char_end);
        }

        // Overlap-aware coverage: each chunk starts at or before the previous
        // end, and the union spans the whole text.
        assert_eq!(chunks[0].char_start, 0);
        for pair in chunks.windows(2) {
            assert!(pair[1].char_start <= pair[0].char_end);
            assert!(pair[1].char_start >= pair[0].char_start);
        }
        assert_eq!(chunks.last().unwrap().char_end, text.len());
    }

    #[test]
    fn chunk_text_matches_its_offsets_modulo_trim() {
        let chunker = TextChunker::new(150, 15);
        let text = sentences(20, 5);

        for chunk in chunker.chunk(&text) {
            let span = &text[chunk.char_start..chunk.char_end];
            assert_eq!(chunk.text, span.trim());
        }
    }

    #[test]
    fn no_chunk_exceeds_size_plus_longest_sentence() {
        let chunker = TextChunker::new(100, 10);
        let text = sentences(25, 4);

        let longest_sentence = chunker
            .split_sentences(&text)
            .iter()
            .map(|s| s.len())
            .max()
            .unwrap();

        for chunk in chunker.chunk(&text) {
            assert!(chunk.char_end - chunk.char_start <= 100 + longest_sentence);
        }
    }

    #[test]
    fn oversized_single_sentence_is_still_emitted() {
        let chunker = TextChunker::new(32, 4);
        let text = "this single sentence is much longer than the configured chunk size";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn thousand_char_document_splits_into_two_overlapping_chunks() {
        // Two 500-character sentences, chunk_size 512, overlap 51
        let sentence = format!("{}. ", "x".repeat(498));
        let text = sentence.repeat(2);
        assert_eq!(text.len(), 1000);

        let chunker = TextChunker::new(512, 51);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 2);
        // Second chunk starts inside the overlap band at the end of the first
        assert_eq!(chunks[1].char_start, chunks[0].char_end - 51);
        assert!(chunks[1].char_start < chunks[0].char_end);
        assert_eq!(chunks[0].char_start, 0);
        assert_eq!(chunks[1].char_end, text.len());
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = TextChunker::new(128, 12);
        let text = sentences(15, 7);
        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn offsets_advance_with_zero_overlap() {
        let chunker = TextChunker::new(80, 0);
        let text = sentences(20, 4);
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].char_start, pair[0].char_end);
        }
    }

    #[test]
    fn multibyte_text_never_splits_a_character() {
        let chunker = TextChunker::new(64, 8);
        let text = "Überraschung für alle Gäste. ".repeat(10);
        // Would panic on a non-boundary slice if the carry cut were wrong
        let chunks = chunker.chunk(&text);
        assert!(!chunks.is_empty());
    }
}
