//! Pluggable strategies for splitting documents into token-bounded chunks.
//!
//! Every strategy implements [`ChunkStrategy`] and shares the same
//! guarantees: chunks never exceed `max_tokens`, they are emitted in
//! ascending start order with dense zero-based ordinals, and `text` is
//! always the exact `body[start..end]` byte slice. The [`strategy`] factory
//! resolves a strategy by name:
//!
//! | Name | Behavior |
//! |------|----------|
//! | `fixed` | Token-sized windows with word-boundary trimming and overlap |
//! | `headers` / `markdown-headers` | One chunk per heading-delimited section |
//! | `recursive` | Hierarchical split: paragraph → line → space → character |
//! | `semantic` | Named capability; currently delegates to `fixed` |

mod fixed;
mod headers;
mod recursive;
mod semantic;

pub use fixed::FixedSizeStrategy;
pub use headers::MarkdownHeaderStrategy;
pub use recursive::RecursiveStrategy;
pub use semantic::SemanticStrategy;

use std::sync::Arc;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::tokenizer::TokenCounter;

/// A token-bounded fragment of a document body.
///
/// `start` and `end` are byte offsets into the body (inclusive-exclusive),
/// always on UTF-8 character boundaries. The `vector` field is reserved for
/// a downstream embedding stage and is never populated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// `<document-id>-chunk-<ordinal>` with a dense zero-based ordinal.
    pub id: String,
    /// The chunk text, verbatim from the document body.
    pub text: String,
    /// Byte offset of the first byte of the chunk.
    pub start: usize,
    /// Byte offset just past the last byte of the chunk.
    pub end: usize,
    /// Token count of `text`.
    pub token_count: usize,
    /// Reserved embedding vector; absent in this core.
    pub vector: Option<Vec<f32>>,
}

/// A document chunking strategy.
pub trait ChunkStrategy: Send + Sync {
    /// Split a document into chunks of at most `max_tokens` tokens, with
    /// `overlap_tokens` of trailing context carried into the next chunk
    /// where the strategy supports overlap.
    fn chunk(
        &self,
        doc: &Document,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Vec<Chunk>>;
}

impl std::fmt::Debug for dyn ChunkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChunkStrategy")
    }
}

/// All recognized strategy names, including aliases.
pub const STRATEGIES: &[&str] = &["fixed", "headers", "markdown-headers", "recursive", "semantic"];

/// The strategy used when none is specified.
pub const DEFAULT_STRATEGY: &str = "fixed";

/// Resolve a strategy name (case-sensitive) to an instance sharing the
/// given tokenizer.
pub fn strategy(name: &str, tokenizer: Arc<dyn TokenCounter>) -> Result<Box<dyn ChunkStrategy>> {
    match name {
        "fixed" => Ok(Box::new(FixedSizeStrategy::new(tokenizer))),
        "headers" | "markdown-headers" => Ok(Box::new(MarkdownHeaderStrategy::new(tokenizer))),
        "recursive" => Ok(Box::new(RecursiveStrategy::new(tokenizer))),
        "semantic" => Ok(Box::new(SemanticStrategy::new(tokenizer))),
        _ => Err(Error::UnknownStrategy {
            name: name.to_string(),
            supported: STRATEGIES.to_vec(),
        }),
    }
}

pub(crate) fn chunk_id(doc_id: &str, ordinal: usize) -> String {
    format!("{doc_id}-chunk-{ordinal}")
}

pub(crate) fn validate_limits(max_tokens: usize, overlap_tokens: usize) -> Result<()> {
    if max_tokens == 0 || overlap_tokens >= max_tokens {
        return Err(Error::InvalidChunkLimits {
            max_tokens,
            overlap_tokens,
        });
    }
    Ok(())
}

/// Largest position `p` in `[start, hi]`, on a char boundary, such that
/// `count(text[start..p]) <= budget`. Binary search over byte positions;
/// `start` and `hi` must themselves be char boundaries.
pub(crate) fn largest_prefix_within(
    tokenizer: &dyn TokenCounter,
    text: &str,
    start: usize,
    hi: usize,
    budget: usize,
) -> usize {
    let mut left = start;
    let mut right = hi;

    while left < right {
        let mut mid = (left + right + 1) / 2;
        while mid < right && !text.is_char_boundary(mid) {
            mid += 1;
        }
        if !text.is_char_boundary(mid) {
            mid = right;
        }

        if tokenizer.count(&text[start..mid]) <= budget {
            left = mid;
        } else {
            right = mid - 1;
            while right > left && !text.is_char_boundary(right) {
                right -= 1;
            }
        }
    }

    left
}
