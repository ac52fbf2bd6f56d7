//! The llms-full.txt form: README-first concatenation of all documents.

use std::cmp::Ordering;

use crate::cancel::CancelFlag;
use crate::config::ProjectConfig;
use crate::document::Document;
use crate::sink::WarningSink;

/// Outputs larger than this trigger a non-fatal oversize warning.
pub const OVERSIZE_WARN_BYTES: usize = 1_048_576;

/// Render the full-concatenation form.
///
/// Documents whose basename is `readme.md` (case-insensitive) sort first and
/// keep their relative order; all others follow in relative-path order. Each
/// document is rendered as `# <title>` followed by its verbatim body, with
/// `---` separators in between. Output exceeding 1 MiB produces a single
/// warning through the sink but is returned in full.
pub fn to_llms_full_txt(
    documents: &[Document],
    config: &ProjectConfig,
    sink: &dyn WarningSink,
    cancel: &CancelFlag,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", config.name));
    out.push_str(&format!("> {}\n\n", config.description));

    let mut sorted: Vec<&Document> = documents.iter().collect();
    sorted.sort_by(|a, b| match (is_readme(a), is_readme(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.relative_path.cmp(&b.relative_path),
    });

    for (i, doc) in sorted.iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        if i > 0 {
            out.push_str("---\n\n");
        }
        out.push_str(&format!("# {}\n\n", doc.title));
        out.push_str(&doc.body);
        out.push_str("\n\n");
    }

    if out.len() > OVERSIZE_WARN_BYTES {
        sink.warn(&format!(
            "llms-full.txt output is {} bytes ({:.2} MB), which may exceed LLM context limits",
            out.len(),
            out.len() as f64 / OVERSIZE_WARN_BYTES as f64
        ));
    }

    out
}

fn is_readme(doc: &Document) -> bool {
    doc.relative_path
        .rsplit('/')
        .next()
        .map(|name| name.eq_ignore_ascii_case("readme.md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::doc_at;
    use crate::sink::{CollectSink, NoWarnings};

    fn config() -> ProjectConfig {
        ProjectConfig {
            name: "P".to_string(),
            description: "D".to_string(),
        }
    }

    #[test]
    fn readme_sorts_first_then_paths() {
        let docs = vec![
            doc_at("docs/zebra.md", "Zebra", "z"),
            doc_at("docs/apple.md", "Apple", "a"),
            doc_at("README.md", "Readme", "r"),
            doc_at("docs/banana.md", "Banana", "b"),
        ];

        let out = to_llms_full_txt(&docs, &config(), &NoWarnings, &CancelFlag::new());

        let readme = out.find("# Readme").unwrap();
        let apple = out.find("# Apple").unwrap();
        let banana = out.find("# Banana").unwrap();
        let zebra = out.find("# Zebra").unwrap();
        assert!(readme < apple && apple < banana && banana < zebra);
    }

    #[test]
    fn nested_readme_also_sorts_first() {
        let docs = vec![
            doc_at("docs/api.md", "Api", "a"),
            doc_at("docs/ReadMe.md", "Nested Readme", "r"),
        ];
        let out = to_llms_full_txt(&docs, &config(), &NoWarnings, &CancelFlag::new());
        assert!(out.find("# Nested Readme").unwrap() < out.find("# Api").unwrap());
    }

    #[test]
    fn documents_separated_by_rules() {
        let docs = vec![doc_at("a.md", "A", "one"), doc_at("b.md", "B", "two")];
        let out = to_llms_full_txt(&docs, &config(), &NoWarnings, &CancelFlag::new());
        assert_eq!(out.matches("---\n\n").count(), 1);
        assert!(out.contains("# A\n\none\n\n---\n\n# B\n\ntwo\n\n"));
    }

    #[test]
    fn header_lines_present() {
        let out = to_llms_full_txt(&[], &config(), &NoWarnings, &CancelFlag::new());
        assert!(out.starts_with("# P\n\n> D\n\n"));
    }

    #[test]
    fn oversize_output_warns_once_but_returns_everything() {
        let big_body = "x".repeat(OVERSIZE_WARN_BYTES + 10);
        let docs = vec![doc_at("big.md", "Big", &big_body)];
        let sink = CollectSink::new();

        let out = to_llms_full_txt(&docs, &config(), &sink, &CancelFlag::new());

        assert!(out.len() > OVERSIZE_WARN_BYTES);
        assert!(out.contains(&big_body));
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn normal_output_does_not_warn() {
        let docs = vec![doc_at("a.md", "A", "small")];
        let sink = CollectSink::new();
        to_llms_full_txt(&docs, &config(), &sink, &CancelFlag::new());
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn cancellation_stops_at_document_boundary() {
        let docs = vec![doc_at("a.md", "A", "one"), doc_at("b.md", "B", "two")];
        let cancel = CancelFlag::new();
        cancel.cancel();
        let out = to_llms_full_txt(&docs, &config(), &NoWarnings, &cancel);
        assert!(out.starts_with("# P"));
        assert!(!out.contains("# A"));
    }
}
