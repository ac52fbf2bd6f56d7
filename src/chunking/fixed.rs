//! Fixed-size token chunking with word-boundary trimming and overlap.

use std::sync::Arc;

use crate::chunking::{chunk_id, largest_prefix_within, validate_limits, Chunk, ChunkStrategy};
use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::TokenCounter;

/// Splits a body left-to-right into windows of at most `max_tokens` tokens.
///
/// Each window end is found by binary search over byte positions, then
/// walked back up to 100 bytes to the nearest space or newline so words are
/// not split. The next window starts at the position that leaves roughly
/// `overlap_tokens` of the previous chunk's tail as shared context.
pub struct FixedSizeStrategy {
    tokenizer: Arc<dyn TokenCounter>,
}

impl FixedSizeStrategy {
    pub fn new(tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self { tokenizer }
    }

    /// Chunk a raw text with chunk IDs derived from `doc_id` and offsets
    /// relative to the text start. The header strategy reuses this for
    /// oversize sections.
    pub(crate) fn chunk_text(
        &self,
        doc_id: &str,
        content: &str,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>> {
        validate_limits(max_tokens, overlap_tokens)?;

        let total = self.tokenizer.count(content);
        if total <= max_tokens {
            return Ok(vec![Chunk {
                id: chunk_id(doc_id, 0),
                text: content.to_string(),
                start: 0,
                end: content.len(),
                token_count: total,
                vector: None,
            }]);
        }

        let mut chunks = Vec::new();
        let mut ordinal = 0usize;
        let mut start = 0usize;

        while start < content.len() {
            let mut end = content.len();

            if self.tokenizer.count(&content[start..end]) > max_tokens {
                end = largest_prefix_within(
                    self.tokenizer.as_ref(),
                    content,
                    start,
                    content.len(),
                    max_tokens,
                );

                // Walk back to a word boundary within 100 bytes
                if end < content.len() && end > start {
                    let floor = start.max(end.saturating_sub(100));
                    let bytes = content.as_bytes();
                    for i in ((floor + 1)..=end).rev() {
                        if bytes[i - 1] == b' ' || bytes[i - 1] == b'\n' {
                            end = i;
                            break;
                        }
                    }
                }

                // Force one character when even a single character exceeds
                // the budget, so the loop always advances.
                if end == start {
                    end = next_char_boundary(content, start + 1);
                }
            }

            let text = &content[start..end];
            chunks.push(Chunk {
                id: chunk_id(doc_id, ordinal),
                text: text.to_string(),
                start,
                end,
                token_count: self.tokenizer.count(text),
                vector: None,
            });
            ordinal += 1;

            if end >= content.len() {
                break;
            }

            if overlap_tokens > 0 {
                let target = self.tokenizer.count(text).saturating_sub(overlap_tokens);
                if target == 0 {
                    // Overlap as large as the chunk: advance without overlap
                    start = end;
                    continue;
                }
                let chunk_start = start;
                start = largest_prefix_within(
                    self.tokenizer.as_ref(),
                    content,
                    chunk_start,
                    end,
                    target,
                );
                // The overlap search must advance past the chunk start
                if start == chunk_start {
                    start = end;
                }
            } else {
                start = end;
            }

            if start > end {
                start = end;
            }
        }

        Ok(chunks)
    }
}

fn next_char_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i.min(text.len())
}

impl ChunkStrategy for FixedSizeStrategy {
    fn chunk(
        &self,
        doc: &Document,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>> {
        self.chunk_text(&doc.id, &doc.body, max_tokens, overlap_tokens)
    }
}
