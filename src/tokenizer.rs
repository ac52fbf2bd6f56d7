//! Token counting behind a capability trait.
//!
//! Chunk sizes are measured in tokens of the `cl100k_base` byte-pair
//! encoding, the encoding shared by contemporary OpenAI chat models. The
//! [`TokenCounter`] trait keeps the rest of the pipeline independent of the
//! concrete encoder so tests can substitute a deterministic counter.

use crate::error::{Error, Result};

/// Encodes text into token IDs and counts tokens.
///
/// Implementations must be safe for concurrent use; the tokenizer is
/// constructed once per export run and shared read-only across strategies
/// and exporters. `encode` and `count` never fail, including on empty input.
pub trait TokenCounter: Send + Sync {
    /// Convert text into a sequence of token IDs.
    fn encode(&self, text: &str) -> Vec<usize>;

    /// The number of tokens in the given text.
    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// [`TokenCounter`] backed by the `cl100k_base` encoding.
pub struct TikTokenizer {
    bpe: tiktoken_rs::CoreBPE,
}

impl TikTokenizer {
    /// Load the `cl100k_base` encoding table.
    ///
    /// Fails when the table cannot be loaded; this is fatal for an export
    /// run and no export proceeds.
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|err| Error::Tokenizer {
            message: err.to_string(),
        })?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TikTokenizer {
    fn encode(&self, text: &str) -> Vec<usize> {
        self.bpe.encode_ordinary(text)
    }
}
