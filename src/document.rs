//! Core data types and Markdown structure extraction.
//!
//! These types flow through the whole pipeline:
//!
//! ```text
//! Scanner → Document → chunk() → Chunk → Exporters
//!              │
//!              ├─ Section   (heading-delimited spans)
//!              ├─ Link      ([text](url) occurrences)
//!              └─ CodeBlock (fenced blocks)
//! ```
//!
//! A [`Document`] is immutable once built. Its `body` is the file content
//! with any leading YAML frontmatter removed; the frontmatter itself is
//! parsed into a dynamically-typed `metadata` map.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").expect("valid regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```(\w*)$").expect("valid regex"));
static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid regex"));

/// A parsed Markdown file with its extracted structural elements.
///
/// | Field | Description |
/// |-------|-------------|
/// | `id` | SHA-256 hex of `relative_path`; stable across runs |
/// | `path` | Absolute filesystem path |
/// | `relative_path` | Path relative to the scan root, forward slashes |
/// | `title` | Frontmatter `title`, else first H1, else `"Untitled"` |
/// | `body` | File content with the frontmatter block removed |
/// | `modified` | Filesystem modification timestamp |
/// | `metadata` | Key-value data parsed from YAML frontmatter (may be empty) |
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier derived from the relative path.
    pub id: String,
    /// Absolute file path on the filesystem.
    pub path: PathBuf,
    /// File path relative to the scanned root, normalized to forward slashes.
    pub relative_path: String,
    /// Document title from frontmatter or the first H1.
    pub title: String,
    /// Markdown content with any frontmatter removed.
    pub body: String,
    /// Last modification time of the file.
    pub modified: DateTime<Utc>,
    /// Key-value data parsed from YAML frontmatter.
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    /// Sections extracted from the document, in order of appearance.
    pub sections: Vec<Section>,
    /// Links found in the document, in order of appearance.
    pub links: Vec<Link>,
    /// Fenced code blocks found in the document, in order of appearance.
    pub code_blocks: Vec<CodeBlock>,
}

/// A structural span introduced by a Markdown heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// URL-friendly slug of the section title.
    pub id: String,
    /// Heading text.
    pub title: String,
    /// Heading level (1-6).
    pub level: usize,
    /// Content between this heading and the next, trimmed.
    pub content: String,
    /// 0-based line index of the heading.
    pub start_line: usize,
    /// 0-based line index just past the section's last line (exclusive).
    pub end_line: usize,
}

/// A hyperlink found within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Anchor text.
    pub text: String,
    /// Destination URL.
    pub url: String,
    /// True unless the URL starts with `http://`, `https://`, or `//`.
    pub is_internal: bool,
}

/// A fenced code block within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag from the opening fence (may be empty).
    pub language: String,
    /// Literal block content without the fences.
    pub content: String,
    /// 0-based line index of the opening fence.
    pub start_line: usize,
    /// 0-based line index of the closing fence.
    pub end_line: usize,
}

impl Document {
    /// Determine the title: a non-empty frontmatter `title` string wins,
    /// then the first H1 heading, then the literal `"Untitled"`.
    pub fn extract_title(&self) -> String {
        if let Some(serde_yaml::Value::String(title)) = self.metadata.get("title") {
            if !title.is_empty() {
                return title.clone();
            }
        }

        for line in self.body.lines() {
            if let Some(caps) = H1_RE.captures(line) {
                return caps[1].trim().to_string();
            }
        }

        "Untitled".to_string()
    }

    /// Extract all heading-delimited sections from the body.
    ///
    /// Content before the first heading belongs to no section. `end_line`
    /// is exclusive: it is the index of the next heading line, or the total
    /// line count for the final section.
    pub fn extract_sections(&self) -> Vec<Section> {
        let lines: Vec<&str> = self.body.split('\n').collect();
        let mut sections = Vec::new();

        let mut current: Option<Section> = None;
        let mut content = String::new();

        for (i, line) in lines.iter().enumerate() {
            if let Some(caps) = HEADING_RE.captures(line) {
                if let Some(mut section) = current.take() {
                    section.content = content.trim().to_string();
                    section.end_line = i;
                    sections.push(section);
                    content.clear();
                }

                let title = caps[2].trim().to_string();
                current = Some(Section {
                    id: slugify(&title),
                    title,
                    level: caps[1].len(),
                    content: String::new(),
                    start_line: i,
                    end_line: 0,
                });
            } else if current.is_some() {
                content.push_str(line);
                content.push('\n');
            }
        }

        if let Some(mut section) = current {
            section.content = content.trim().to_string();
            section.end_line = lines.len();
            sections.push(section);
        }

        sections
    }

    /// Extract all `[text](url)` links and classify them as internal or
    /// external.
    pub fn extract_links(&self) -> Vec<Link> {
        LINK_RE
            .captures_iter(&self.body)
            .map(|caps| {
                let url = caps[2].to_string();
                let is_internal = !url.starts_with("http://")
                    && !url.starts_with("https://")
                    && !url.starts_with("//");
                Link {
                    text: caps[1].to_string(),
                    url,
                    is_internal,
                }
            })
            .collect()
    }

    /// Extract all fenced code blocks. A line matching `` ^```(\w*)$ ``
    /// toggles block state; the opening fence carries the language tag.
    pub fn extract_code_blocks(&self) -> Vec<CodeBlock> {
        let mut blocks = Vec::new();
        let mut current: Option<CodeBlock> = None;
        let mut content = String::new();

        for (i, line) in self.body.split('\n').enumerate() {
            if let Some(caps) = FENCE_RE.captures(line) {
                match current.take() {
                    None => {
                        current = Some(CodeBlock {
                            language: caps[1].to_string(),
                            content: String::new(),
                            start_line: i,
                            end_line: 0,
                        });
                    }
                    Some(mut block) => {
                        block.content = std::mem::take(&mut content);
                        block.end_line = i;
                        blocks.push(block);
                    }
                }
            } else if current.is_some() {
                content.push_str(line);
                content.push('\n');
            }
        }

        blocks
    }
}

/// Strip a leading YAML frontmatter block and parse it.
///
/// The block must open with `---\n` at the very start and close with a later
/// `\n---\n`. Returns the parsed key-value mapping (empty when the block is
/// absent or not valid YAML) and the remaining body. Without a complete
/// delimiter pair the content is returned unchanged.
pub fn extract_frontmatter(content: &str) -> (BTreeMap<String, serde_yaml::Value>, &str) {
    if !content.starts_with("---\n") {
        return (BTreeMap::new(), content);
    }

    match content[4..].find("\n---\n") {
        None => (BTreeMap::new(), content),
        Some(end) => {
            let raw = &content[4..4 + end];
            let metadata = serde_yaml::from_str(raw).unwrap_or_default();
            (metadata, &content[end + 8..])
        }
    }
}

/// Create a URL-friendly slug from a heading title: lowercase, with runs of
/// non-`[a-z0-9-]` characters collapsed to `-` and the ends trimmed.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_body(body: &str) -> Document {
        Document {
            id: "test".to_string(),
            path: PathBuf::from("/tmp/test.md"),
            relative_path: "test.md".to_string(),
            title: String::new(),
            body: body.to_string(),
            modified: Utc::now(),
            metadata: BTreeMap::new(),
            sections: Vec::new(),
            links: Vec::new(),
            code_blocks: Vec::new(),
        }
    }

    #[test]
    fn frontmatter_stripped_and_parsed() {
        let content = "---\ntitle: Hello\ntags:\n  - a\n  - b\n---\n# Body\n";
        let (metadata, body) = extract_frontmatter(content);
        assert_eq!(
            metadata.get("title"),
            Some(&serde_yaml::Value::String("Hello".to_string()))
        );
        assert!(metadata.contains_key("tags"));
        assert!(!body.contains("title: Hello"));
        assert!(body.contains("# Body"));
    }

    #[test]
    fn frontmatter_absent_returns_content_unchanged() {
        let content = "# Just a heading\n\nBody.";
        let (metadata, body) = extract_frontmatter(content);
        assert!(metadata.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn frontmatter_unterminated_returns_content_unchanged() {
        let content = "---\ntitle: Broken\nno closing delimiter";
        let (metadata, body) = extract_frontmatter(content);
        assert!(metadata.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn frontmatter_invalid_yaml_still_strips() {
        let content = "---\n[not yaml: {{{\n---\nBody text";
        let (metadata, body) = extract_frontmatter(content);
        assert!(metadata.is_empty());
        assert!(body.ends_with("Body text"));
        assert!(!body.contains("not yaml"));
    }

    #[test]
    fn title_prefers_frontmatter() {
        let mut doc = doc_with_body("# Heading Title\n\nContent.");
        doc.metadata.insert(
            "title".to_string(),
            serde_yaml::Value::String("Front Title".to_string()),
        );
        assert_eq!(doc.extract_title(), "Front Title");
    }

    #[test]
    fn title_falls_back_to_first_h1() {
        let doc = doc_with_body("Intro text.\n\n# The Real Title\n\nMore.");
        assert_eq!(doc.extract_title(), "The Real Title");
    }

    #[test]
    fn title_empty_frontmatter_string_falls_through() {
        let mut doc = doc_with_body("# H1 Title\n");
        doc.metadata.insert(
            "title".to_string(),
            serde_yaml::Value::String(String::new()),
        );
        assert_eq!(doc.extract_title(), "H1 Title");
    }

    #[test]
    fn title_defaults_to_untitled() {
        let doc = doc_with_body("No headings here, just prose.");
        assert_eq!(doc.extract_title(), "Untitled");
    }

    #[test]
    fn sections_extracted_with_levels_and_lines() {
        let doc = doc_with_body("# One\n\nalpha\n\n## Two\n\nbeta\n\n### Three\n\ngamma");
        let sections = doc.extract_sections();
        assert_eq!(sections.len(), 3);

        assert_eq!(sections[0].title, "One");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].content, "alpha");
        assert_eq!(sections[0].start_line, 0);
        assert_eq!(sections[0].end_line, 4);

        assert_eq!(sections[1].title, "Two");
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[1].start_line, 4);
        assert_eq!(sections[1].end_line, 8);

        assert_eq!(sections[2].title, "Three");
        assert_eq!(sections[2].level, 3);
        assert_eq!(sections[2].content, "gamma");
        assert_eq!(sections[2].start_line, 8);
        assert_eq!(sections[2].end_line, 11);
    }

    #[test]
    fn preamble_before_first_heading_is_not_a_section() {
        let doc = doc_with_body("intro line\n\n# First\n\nbody");
        let sections = doc.extract_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "First");
    }

    #[test]
    fn section_ids_are_slugs() {
        let doc = doc_with_body("## Getting Started: A Guide!\n\ntext");
        let sections = doc.extract_sections();
        assert_eq!(sections[0].id, "getting-started-a-guide");
    }

    #[test]
    fn links_classified_internal_external() {
        let doc = doc_with_body(
            "[guide](docs/guide.md) and [site](https://example.com) \
             and [plain](http://example.com) and [cdn](//cdn.example.com/x)",
        );
        let links = doc.extract_links();
        assert_eq!(links.len(), 4);
        assert!(links[0].is_internal);
        assert_eq!(links[0].text, "guide");
        assert_eq!(links[0].url, "docs/guide.md");
        assert!(!links[1].is_internal);
        assert!(!links[2].is_internal);
        assert!(!links[3].is_internal);
    }

    #[test]
    fn code_blocks_with_language_and_lines() {
        let doc = doc_with_body("text\n```rust\nfn main() {}\n```\nmore\n```\nplain\n```");
        let blocks = doc.extract_code_blocks();
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].language, "rust");
        assert_eq!(blocks[0].content, "fn main() {}\n");
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[0].end_line, 3);

        assert_eq!(blocks[1].language, "");
        assert_eq!(blocks[1].content, "plain\n");
    }

    #[test]
    fn unterminated_code_block_is_dropped() {
        let doc = doc_with_body("```go\nfmt.Println()\nno closing fence");
        assert!(doc.extract_code_blocks().is_empty());
    }

    #[test]
    fn slugify_rules() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Spaces  Around  "), "spaces-around");
        assert_eq!(slugify("C++ & Rust!"), "c-rust");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }
}
