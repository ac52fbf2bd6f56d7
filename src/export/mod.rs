//! Export forms and the orchestrator entry points.
//!
//! Four forms are produced from scanned documents:
//!
//! | Form | Builder | Shape |
//! |------|---------|-------|
//! | Index | [`build_index`] | `llms.txt` directory-grouped link listing |
//! | Full | [`build_full`] | `llms-full.txt` README-first concatenation |
//! | JSONL | [`build_jsonl`] | one chunk per line, for vector-DB ingest |
//! | Enriched Markdown | [`build_markdown`] | TOC + per-document YAML headers |
//!
//! Each entry point is pure given its inputs, except for the oversize
//! warning the full form may emit through its sink. The JSONL and Markdown
//! builders construct one `cl100k_base` tokenizer per call and share it
//! across all documents.

mod full;
mod index;
mod jsonl;
mod markdown;

pub use full::{to_llms_full_txt, OVERSIZE_WARN_BYTES};
pub use index::to_llms_txt;
pub use jsonl::{to_jsonl, ChunkRecord};
pub use markdown::to_enriched_markdown;

use std::sync::Arc;

use crate::cancel::CancelFlag;
use crate::chunking;
use crate::config::ProjectConfig;
use crate::document::Document;
use crate::error::Result;
use crate::sink::WarningSink;
use crate::tokenizer::{TikTokenizer, TokenCounter};

/// Build the `llms.txt` index form.
pub fn build_index(documents: &[Document], config: &ProjectConfig) -> String {
    index::to_llms_txt(documents, config)
}

/// Build the `llms-full.txt` concatenation form.
pub fn build_full(
    documents: &[Document],
    config: &ProjectConfig,
    sink: &dyn WarningSink,
    cancel: &CancelFlag,
) -> String {
    full::to_llms_full_txt(documents, config, sink, cancel)
}

/// Chunk all documents with the named strategy and build the JSONL form.
///
/// Fails on an unknown strategy name, invalid chunk limits, or a tokenizer
/// initialization failure; in all three cases no output is produced.
pub fn build_jsonl(
    documents: &[Document],
    strategy_name: &str,
    max_tokens: usize,
    overlap_tokens: usize,
    cancel: &CancelFlag,
) -> Result<String> {
    let tokenizer: Arc<dyn TokenCounter> = Arc::new(TikTokenizer::new()?);
    let chunker = chunking::strategy(strategy_name, tokenizer)?;
    jsonl::to_jsonl(documents, chunker.as_ref(), max_tokens, overlap_tokens, cancel)
}

/// Build the enriched-Markdown form.
pub fn build_markdown(documents: &[Document], cancel: &CancelFlag) -> Result<String> {
    let tokenizer = TikTokenizer::new()?;
    markdown::to_enriched_markdown(documents, &tokenizer, cancel)
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{TimeZone, Utc};
    use sha2::{Digest, Sha256};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::document::Document;

    /// Build a document with a derived id and a fixed timestamp.
    pub fn doc_at(relative_path: &str, title: &str, body: &str) -> Document {
        Document {
            id: format!("{:x}", Sha256::digest(relative_path.as_bytes())),
            path: PathBuf::from(format!("/corpus/{relative_path}")),
            relative_path: relative_path.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            metadata: BTreeMap::new(),
            sections: Vec::new(),
            links: Vec::new(),
            code_blocks: Vec::new(),
        }
    }
}
