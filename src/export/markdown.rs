//! The enriched-Markdown form: a table of contents followed by each
//! document's YAML metadata header and verbatim body.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::cancel::CancelFlag;
use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::TokenCounter;

/// YAML metadata emitted ahead of each document body.
///
/// `chunk_id` carries the document identity; the name is historical and
/// kept for consumers that already key on it.
#[derive(Debug, Serialize)]
struct DocumentHeader {
    source: String,
    section: String,
    chunk_id: String,
    token_count: usize,
    modified: String,
}

/// Render the enriched-Markdown form in input order.
pub fn to_enriched_markdown(
    documents: &[Document],
    tokenizer: &dyn TokenCounter,
    cancel: &CancelFlag,
) -> Result<String> {
    let mut out = String::new();

    out.push_str(&table_of_contents(documents));
    out.push_str("\n\n");

    for (i, doc) in documents.iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }

        let header = DocumentHeader {
            source: doc.relative_path.clone(),
            section: doc
                .sections
                .first()
                .map(|s| s.title.clone())
                .unwrap_or_else(|| doc.title.clone()),
            chunk_id: doc.id.clone(),
            token_count: tokenizer.count(&doc.body),
            modified: doc.modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&header)?);
        out.push_str("---\n\n");

        out.push_str(&doc.body);

        let enrichment = contextual_enrichment(doc);
        if !enrichment.is_empty() {
            out.push_str("\n\n");
            out.push_str(&enrichment);
        }

        if i < documents.len() - 1 {
            out.push_str("\n\n---\n\n");
        }
    }

    Ok(out)
}

fn table_of_contents(documents: &[Document]) -> String {
    let mut toc = String::new();
    toc.push_str("## Table of Contents\n\n");

    for doc in documents {
        toc.push_str(&format!("- [{}](#{})\n", doc.title, anchor(&doc.title)));

        for section in &doc.sections {
            if section.level <= 2 {
                let indent = "  ".repeat(section.level - 1);
                toc.push_str(&format!(
                    "{indent}- [{}](#{})\n",
                    section.title,
                    anchor(&section.title)
                ));
            }
        }
    }

    toc
}

/// Anchor slug: lowercase, spaces to `-`, all other non-`[a-z0-9-]`
/// characters dropped.
fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Extension point for injecting contextual Markdown after a document body.
///
/// Returns the empty string in this core; a future implementation can
/// derive context from the surrounding collection and the call site above
/// will include it.
fn contextual_enrichment(_doc: &Document) -> String {
    String::new()
}
