//! # Text Chunking Module
//!
//! This module splits extracted article text into bounded retrieval units.
//! The splitter cuts at the highest-priority boundary it can find inside the
//! size window, trying boundary kinds in order: paragraph break, line break,
//! sentence end, clause comma. Only when no boundary exists does it fall back
//! to a hard cut at the size limit.
//!
//! Boundary characters stay with the chunk that precedes them, so the
//! concatenation of all chunks reproduces the input text exactly. Sizes are
//! measured in characters and cuts never land inside a UTF-8 sequence.

use crate::processor::config::ChunkOptions;
use serde::Serialize;
use tracing::{debug, instrument};

/// A chunk of text with its position in the source document
#[derive(Debug, Clone, Serialize)]
pub struct TextChunk {
    /// The text of the chunk
    pub text: String,

    /// The position of the chunk in the original document
    pub position: usize,
}

/// Boundary kinds in priority order. Within a kind, the latest occurrence in
/// the window wins.
const BOUNDARIES: &[&[&str]] = &[&["\n\n"], &["\n"], &[". ", "! ", "? "], &[", "]];

/// Split text into chunks of at most `max_chunk_size` characters.
///
/// Degenerate input is not an error: empty text yields an empty list. If the
/// options carry a document length cap, the text is truncated to that many
/// characters before splitting.
#[instrument(skip(text))]
pub fn split_text(text: &str, options: &ChunkOptions) -> Vec<String> {
    let text = match options.max_document_length {
        Some(cap) => truncate_chars(text, cap),
        None => text,
    };
    let max_size = options.max_chunk_size.max(1);

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(window_end) = byte_index_after_chars(rest, max_size) else {
            // The remainder fits in a single chunk.
            chunks.push(rest.to_string());
            break;
        };
        let cut = find_boundary(&rest[..window_end]).unwrap_or(window_end);
        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    debug!("Split text into {} chunks", chunks.len());
    chunks
}

/// Split a document's text into position-tagged chunks.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Vec<TextChunk> {
    split_text(text, options)
        .into_iter()
        .enumerate()
        .map(|(position, text)| TextChunk { text, position })
        .collect()
}

/// Find the byte offset of the highest-priority boundary in the window,
/// positioned just past the boundary characters.
fn find_boundary(window: &str) -> Option<usize> {
    for group in BOUNDARIES {
        let cut = group
            .iter()
            .filter_map(|sep| window.rfind(sep).map(|pos| pos + sep.len()))
            .max();
        if cut.is_some() {
            return cut;
        }
    }
    None
}

/// Byte index just past `count` characters, or `None` if the text holds at
/// most `count` characters.
fn byte_index_after_chars(text: &str, count: usize) -> Option<usize> {
    text.char_indices().nth(count).map(|(idx, _)| idx)
}

/// Truncate to at most `count` characters without splitting a UTF-8 sequence.
fn truncate_chars(text: &str, count: usize) -> &str {
    match byte_index_after_chars(text, count) {
        Some(end) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(max_chunk_size: usize) -> ChunkOptions {
        ChunkOptions {
            max_chunk_size,
            max_document_length: None,
        }
    }

    fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("", &options(100)).is_empty());
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = split_text("a short article", &options(100));
        assert_eq!(chunks, vec!["a short article".to_string()]);
    }

    #[test]
    fn test_chunks_respect_max_size_and_reconstruct_input() {
        let text = "The first paragraph talks about the announcement.\n\n\
                    The second paragraph goes into detail. It has two sentences.\n\n\
                    A third paragraph, with a clause, closes the piece.";
        let opts = options(60);

        let chunks = split_text(text, &opts);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(char_len(chunk) <= 60, "chunk too large: {:?}", chunk);
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let chunks = split_text("aaaa\n\nbbbb", &options(8));
        assert_eq!(chunks, vec!["aaaa\n\n".to_string(), "bbbb".to_string()]);
    }

    #[test]
    fn test_prefers_line_boundary_over_sentence() {
        let chunks = split_text("one two.\nthree four five six", &options(12));
        assert_eq!(chunks[0], "one two.\n");
    }

    #[test]
    fn test_sentence_boundary_beats_clause_comma() {
        let chunks = split_text("one two. three, four five six", &options(12));
        assert_eq!(chunks[0], "one two. ");
        assert_eq!(chunks[1], "three, ");
        assert_eq!(chunks.concat(), "one two. three, four five six");
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let chunks = split_text("abcdefghij", &options(4));
        assert_eq!(
            chunks,
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn test_hard_cut_keeps_utf8_intact() {
        let text = "日本語のテキストを分割する。それから続きます。";
        let chunks = split_text(text, &options(5));

        for chunk in &chunks {
            assert!(char_len(chunk) <= 5);
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_document_length_cap() {
        let text = "x".repeat(50);
        let opts = ChunkOptions {
            max_chunk_size: 10,
            max_document_length: Some(25),
        };

        let chunks = split_text(&text, &opts);

        let total: usize = chunks.iter().map(|c| char_len(c)).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_chunk_text_positions_follow_source_order() {
        let chunks = chunk_text("aaaa\n\nbbbb\n\ncccc", &options(6));
        let positions: Vec<usize> = chunks.iter().map(|c| c.position).collect();
        assert_eq!(positions, (0..chunks.len()).collect::<Vec<_>>());
    }
}
