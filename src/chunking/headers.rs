//! Chunking at Markdown header boundaries.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chunking::{chunk_id, validate_limits, Chunk, ChunkStrategy, FixedSizeStrategy};
use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::TokenCounter;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("valid regex"));

/// Splits a body into heading-delimited sections, one chunk per section.
///
/// The very first line never opens a new section; any preamble attaches to
/// it. Sections that exceed `max_tokens` are delegated to
/// [`FixedSizeStrategy`] with the same limits and renumbered into the
/// document's ordinal sequence.
pub struct MarkdownHeaderStrategy {
    tokenizer: Arc<dyn TokenCounter>,
    fixed: FixedSizeStrategy,
}

impl MarkdownHeaderStrategy {
    pub fn new(tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self {
            fixed: FixedSizeStrategy::new(Arc::clone(&tokenizer)),
            tokenizer,
        }
    }
}

impl ChunkStrategy for MarkdownHeaderStrategy {
    fn chunk(
        &self,
        doc: &Document,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>> {
        validate_limits(max_tokens, overlap_tokens)?;

        let lines: Vec<&str> = doc.body.split('\n').collect();

        // Group lines into sections at header boundaries
        let mut sections: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 && HEADER_RE.is_match(line) {
                if !current.is_empty() {
                    sections.push(current.join("\n"));
                }
                current = vec![line];
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            sections.push(current.join("\n"));
        }

        let mut chunks = Vec::new();
        let mut ordinal = 0usize;
        let mut offset = 0usize;

        for section in sections {
            let tokens = self.tokenizer.count(&section);

            if tokens <= max_tokens {
                chunks.push(Chunk {
                    id: chunk_id(&doc.id, ordinal),
                    text: section.clone(),
                    start: offset,
                    end: offset + section.len(),
                    token_count: tokens,
                    vector: None,
                });
                ordinal += 1;
            } else {
                // Oversize section: fall back to fixed-size chunking and
                // renumber into this document's sequence
                let sub = self
                    .fixed
                    .chunk_text(&doc.id, &section, max_tokens, overlap_tokens)?;
                for mut chunk in sub {
                    chunk.id = chunk_id(&doc.id, ordinal);
                    chunk.start += offset;
                    chunk.end += offset;
                    chunks.push(chunk);
                    ordinal += 1;
                }
            }

            // +1 for the newline that joined this section to the next
            offset += section.len() + 1;
        }

        Ok(chunks)
    }
}
