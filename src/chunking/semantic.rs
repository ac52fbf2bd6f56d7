//! Semantic boundary detection, as a named capability.
//!
//! A full implementation would embed sentences or paragraphs, measure
//! cosine similarity between consecutive segments, and split where
//! similarity drops. Until an embedding provider is wired in, this strategy
//! delegates to [`FixedSizeStrategy`], which preserves the common chunking
//! contract, so callers and configuration can already select `semantic`.

use std::sync::Arc;

use crate::chunking::{Chunk, ChunkStrategy, FixedSizeStrategy};
use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::TokenCounter;

pub struct SemanticStrategy {
    fallback: FixedSizeStrategy,
}

impl SemanticStrategy {
    pub fn new(tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self {
            fallback: FixedSizeStrategy::new(tokenizer),
        }
    }
}

impl ChunkStrategy for SemanticStrategy {
    fn chunk(
        &self,
        doc: &Document,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>> {
        self.fallback.chunk(doc, max_tokens, overlap_tokens)
    }
}
