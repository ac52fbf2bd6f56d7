//! Hierarchical text splitting over an ordered separator list.

use std::sync::Arc;

use crate::chunking::{chunk_id, largest_prefix_within, validate_limits, Chunk, ChunkStrategy};
use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::TokenCounter;

const SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Splits text by trying separators in order: paragraph, line, space, and
/// finally a character-boundary binary-search split.
///
/// At each depth the text is split on the current separator and parts are
/// greedily re-accumulated (joined by the separator) until adding one more
/// would exceed `max_tokens`; the full buffer then recurses one depth
/// deeper. The empty-string separator forces a binary-search split, after
/// which both halves restart from depth 0.
pub struct RecursiveStrategy {
    tokenizer: Arc<dyn TokenCounter>,
}

impl RecursiveStrategy {
    pub fn new(tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self { tokenizer }
    }

    fn split(
        &self,
        text: &str,
        offset: usize,
        max_tokens: usize,
        chunks: &mut Vec<Chunk>,
        doc_id: &str,
        depth: usize,
    ) {
        let tokens = self.tokenizer.count(text);
        if tokens <= max_tokens {
            chunks.push(Chunk {
                id: chunk_id(doc_id, chunks.len()),
                text: text.to_string(),
                start: offset,
                end: offset + text.len(),
                token_count: tokens,
                vector: None,
            });
            return;
        }

        if depth < SEPARATORS.len() {
            let separator = SEPARATORS[depth];

            if separator.is_empty() {
                // Last resort: character-boundary split
                let cut =
                    largest_prefix_within(self.tokenizer.as_ref(), text, 0, text.len(), max_tokens);
                if cut > 0 {
                    self.split(&text[..cut], offset, max_tokens, chunks, doc_id, depth);
                    self.split(&text[cut..], offset + cut, max_tokens, chunks, doc_id, 0);
                }
                return;
            }

            let parts: Vec<&str> = text.split(separator).collect();
            if parts.len() > 1 {
                let mut current = String::new();
                let mut current_offset = offset;

                for (i, part) in parts.iter().enumerate() {
                    let mut candidate = current.clone();
                    if !candidate.is_empty() {
                        candidate.push_str(separator);
                    }
                    candidate.push_str(part);

                    if self.tokenizer.count(&candidate) <= max_tokens || current.is_empty() {
                        if !current.is_empty() {
                            current.push_str(separator);
                        }
                        current.push_str(part);
                    } else {
                        self.split(&current, current_offset, max_tokens, chunks, doc_id, depth + 1);
                        current_offset += current.len() + separator.len();
                        current = part.to_string();
                    }

                    if i == parts.len() - 1 && !current.is_empty() {
                        self.split(&current, current_offset, max_tokens, chunks, doc_id, depth + 1);
                    }
                }
                return;
            }
        }

        if depth + 1 < SEPARATORS.len() {
            self.split(text, offset, max_tokens, chunks, doc_id, depth + 1);
        } else {
            let cut =
                largest_prefix_within(self.tokenizer.as_ref(), text, 0, text.len(), max_tokens);
            if cut > 0 && cut < text.len() {
                self.split(&text[..cut], offset, max_tokens, chunks, doc_id, 0);
                self.split(&text[cut..], offset + cut, max_tokens, chunks, doc_id, 0);
            }
        }
    }
}

impl ChunkStrategy for RecursiveStrategy {
    fn chunk(
        &self,
        doc: &Document,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>> {
        validate_limits(max_tokens, overlap_tokens)?;

        let total = self.tokenizer.count(&doc.body);
        if total <= max_tokens {
            return Ok(vec![Chunk {
                id: chunk_id(&doc.id, 0),
                text: doc.body.clone(),
                start: 0,
                end: doc.body.len(),
                token_count: total,
                vector: None,
            }]);
        }

        let mut chunks = Vec::new();
        self.split(&doc.body, 0, max_tokens, &mut chunks, &doc.id, 0);
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::testing::{assert_chunk_invariants, doc, WordCounter};

    fn recursive() -> RecursiveStrategy {
        RecursiveStrategy::new(Arc::new(WordCounter))
    }

    #[test]
    fn small_body_yields_single_chunk() {
        let doc = doc("d1", "just a few words");
        let chunks = recursive().chunk(&doc, 100, 0).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, doc.body.len());
    }

    #[test]
    fn splits_on_paragraph_boundaries_first() {
        let body = "first paragraph here\n\nsecond paragraph here\n\nthird paragraph here";
        let doc = doc("d1", body);
        let chunks = recursive().chunk(&doc, 4, 0).unwrap();

        assert!(chunks.len() >= 2);
        assert_chunk_invariants(&doc, &chunks, 4);
        // Paragraph-sized pieces should come out whole
        assert!(chunks.iter().any(|c| c.text == "first paragraph here"));
    }

    #[test]
    fn descends_to_lines_and_words() {
        let body = "one two three four five six seven\neight nine ten eleven twelve";
        let doc = doc("d1", body);
        let chunks = recursive().chunk(&doc, 3, 0).unwrap();

        assert!(chunks.len() >= 4);
        assert_chunk_invariants(&doc, &chunks, 3);
    }

    #[test]
    fn grouped_parts_stay_within_limit() {
        let body = "aa bb\n\ncc dd\n\nee ff\n\ngg hh\n\nii jj";
        let doc = doc("d1", body);
        let chunks = recursive().chunk(&doc, 4, 0).unwrap();

        assert_chunk_invariants(&doc, &chunks, 4);
        // Adjacent small paragraphs are grouped, not split one per chunk
        assert!(chunks.len() < 5, "expected grouping, got {} chunks", chunks.len());
    }

    #[test]
    fn multibyte_content_never_panics() {
        let body = "paragraphe français avec des accents éèê\n\nsection über ünïcode zeichen\n\nça continue encore après";
        let doc = doc("d1", body);
        let chunks = recursive().chunk(&doc, 3, 0).unwrap();
        assert_chunk_invariants(&doc, &chunks, 3);
    }
}
