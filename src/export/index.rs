//! The llms.txt index form: a directory-grouped link listing.
//!
//! Output shape, per the llms.txt convention:
//!
//! ```text
//! # <project name>
//!
//! > <project description>
//!
//! ## <directory>
//!
//! - [<title>](<relative path>): <first paragraph, up to 100 chars>
//! ```

use std::collections::BTreeMap;

use crate::config::ProjectConfig;
use crate::document::Document;

const DESCRIPTION_LIMIT: usize = 100;

/// Render the index form for the given documents.
///
/// Documents are grouped by parent directory; groups appear in
/// lexicographic order (the root group, keyed `.`, renders as `Root`).
/// Within a group, documents keep their input order.
pub fn to_llms_txt(documents: &[Document], config: &ProjectConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", config.name));
    out.push_str(&format!("> {}\n\n", config.description));

    let mut grouped: BTreeMap<String, Vec<&Document>> = BTreeMap::new();
    for doc in documents {
        grouped
            .entry(parent_dir(&doc.relative_path))
            .or_default()
            .push(doc);
    }

    for (section, docs) in &grouped {
        let title = if section.is_empty() || section == "." {
            "Root"
        } else {
            section.as_str()
        };
        out.push_str(&format!("## {title}\n\n"));

        for doc in docs {
            out.push_str(&format!(
                "- [{}]({}): {}\n",
                doc.title,
                doc.relative_path,
                first_paragraph(&doc.body)
            ));
        }
        out.push('\n');
    }

    out
}

fn parent_dir(relative_path: &str) -> String {
    match relative_path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    }
}

/// First non-empty, non-heading paragraph of the body outside any fenced
/// code block, flattened to one line and truncated to at most 100
/// characters.
fn first_paragraph(body: &str) -> String {
    let mut paragraph = String::new();
    let mut found_content = false;
    let mut in_fence = false;

    for line in body.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if trimmed.is_empty() {
            if found_content {
                break;
            }
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(trimmed);
        found_content = true;

        if paragraph.chars().count() >= DESCRIPTION_LIMIT {
            break;
        }
    }

    if paragraph.is_empty() {
        return "No description available".to_string();
    }

    if paragraph.chars().count() > DESCRIPTION_LIMIT {
        let truncated: String = paragraph.chars().take(DESCRIPTION_LIMIT - 3).collect();
        return format!("{truncated}...");
    }

    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::doc_at;

    fn config() -> ProjectConfig {
        ProjectConfig {
            name: "Test Project".to_string(),
            description: "A test project".to_string(),
        }
    }

    #[test]
    fn index_form_matches_expected_layout() {
        let docs = vec![
            doc_at("README.md", "README", "# README\n\nMain."),
            doc_at(
                "docs/intro.md",
                "Introduction",
                "# Intro\n\nThis is the introduction.",
            ),
        ];

        let out = to_llms_txt(&docs, &config());

        let expected_order = [
            "# Test Project",
            "> A test project",
            "## Root",
            "- [README](README.md): Main.",
            "## docs",
            "- [Introduction](docs/intro.md): This is the introduction.",
        ];
        let mut cursor = 0;
        for needle in expected_order {
            let found = out[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}\n---\n{out}"));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn sections_sorted_lexicographically() {
        let docs = vec![
            doc_at("zebra/z.md", "Z", "z body"),
            doc_at("alpha/a.md", "A", "a body"),
        ];
        let out = to_llms_txt(&docs, &config());
        let alpha = out.find("## alpha").unwrap();
        let zebra = out.find("## zebra").unwrap();
        assert!(alpha < zebra);
    }

    #[test]
    fn description_skips_headings_and_fences() {
        let body = "# Title\n\n```rust\ncode();\n```\n\nActual description here.";
        let docs = vec![doc_at("a.md", "A", body)];
        let out = to_llms_txt(&docs, &config());
        assert!(out.contains("- [A](a.md): Actual description here."));
    }

    #[test]
    fn description_flattens_multiline_paragraphs() {
        let body = "line one\nline two\n\nsecond paragraph";
        assert_eq!(first_paragraph(body), "line one line two");
    }

    #[test]
    fn description_truncated_at_100_chars() {
        let body = "word ".repeat(50);
        let desc = first_paragraph(&body);
        assert!(desc.ends_with("..."));
        assert!(desc.chars().count() <= DESCRIPTION_LIMIT);
    }

    #[test]
    fn description_ignores_fence_interior_lines() {
        let body = "```\nfn hidden() {}\nmore code\n```\n\nVisible text after the block.";
        assert_eq!(first_paragraph(body), "Visible text after the block.");
    }

    #[test]
    fn description_skips_fenced_block_between_paragraphs() {
        let body = "# Title\n\n```rust\ncode();\n```\n\nProse paragraph.\n\nSecond paragraph.";
        assert_eq!(first_paragraph(body), "Prose paragraph.");
    }

    #[test]
    fn description_truncation_counts_characters_not_bytes() {
        let body = "é".repeat(150);
        let desc = first_paragraph(&body);
        assert_eq!(desc.chars().count(), DESCRIPTION_LIMIT);
        assert!(desc.ends_with("..."));
        assert!(desc.starts_with("ééé"));
    }

    #[test]
    fn multibyte_paragraphs_accumulate_to_the_char_limit() {
        let line = "ü".repeat(30);
        let body = format!("{line}\n{line}\n{line}\n{line}");
        let desc = first_paragraph(&body);
        // Four 30-char lines exceed the limit, so the result is truncated at
        // exactly 100 characters rather than cut short by byte counting.
        assert_eq!(desc.chars().count(), DESCRIPTION_LIMIT);
        assert!(desc.ends_with("..."));
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let docs = vec![doc_at("empty.md", "Empty", "# Only a heading\n")];
        let out = to_llms_txt(&docs, &config());
        assert!(out.contains("- [Empty](empty.md): No description available"));
    }
}
