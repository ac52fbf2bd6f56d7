//! The line-delimited JSON form for vector-database ingest.
//!
//! Each chunk becomes one line of compact JSON followed by `\n`, so
//! consumers can stream the output with a line scanner (Pinecone, Weaviate,
//! and Qdrant loaders all accept this shape). Every line is independently
//! parseable; navigation fields link each chunk to its neighbors within the
//! same document.

use serde::{Deserialize, Serialize};

use crate::cancel::CancelFlag;
use crate::chunking::ChunkStrategy;
use crate::document::Document;
use crate::error::Result;

/// The serialized form of a chunk, one JSON object per output line.
///
/// `prev_chunk_id` / `next_chunk_id` are omitted at the ends of a document's
/// chunk sequence; `vector` is omitted until an embedding stage fills it.
/// Consumers are expected to tolerate additional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub doc_id: String,
    pub chunk_id: String,
    pub text: String,
    pub token_count: usize,
    /// Relative path of the source document.
    pub source: String,
    pub start_pos: usize,
    pub end_pos: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prev_chunk_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_chunk_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

/// Chunk every document with the given strategy and render one JSONL line
/// per chunk, preserving input-document order and chunk-ordinal order.
///
/// On cancellation the output is cut at a line boundary and remains valid
/// JSONL. An empty document list yields empty output.
pub fn to_jsonl(
    documents: &[Document],
    chunker: &dyn ChunkStrategy,
    max_tokens: usize,
    overlap_tokens: usize,
    cancel: &CancelFlag,
) -> Result<String> {
    let mut out = String::new();

    'documents: for doc in documents {
        if cancel.is_cancelled() {
            break;
        }

        let chunks = chunker.chunk(doc, max_tokens, overlap_tokens)?;

        for (i, chunk) in chunks.iter().enumerate() {
            if cancel.is_cancelled() {
                break 'documents;
            }

            let record = ChunkRecord {
                doc_id: doc.id.clone(),
                chunk_id: chunk.id.clone(),
                text: chunk.text.clone(),
                token_count: chunk.token_count,
                source: doc.relative_path.clone(),
                start_pos: chunk.start,
                end_pos: chunk.end,
                prev_chunk_id: if i > 0 {
                    chunks[i - 1].id.clone()
                } else {
                    String::new()
                },
                next_chunk_id: if i + 1 < chunks.len() {
                    chunks[i + 1].id.clone()
                } else {
                    String::new()
                },
                vector: chunk.vector.clone(),
            };

            out.push_str(&serde_json::to_string(&record)?);
            out.push('\n');
        }
    }

    Ok(out)
}
