//! Filesystem discovery of Markdown documents.
//!
//! A [`Scanner`] walks a root directory, keeps files whose name ends in
//! `.md` (case-insensitive), applies the ignore patterns, and parses each
//! accepted file into a [`Document`]. Per-entry walk failures and per-file
//! read failures are reported through the warning sink and skipped; only a
//! missing or invalid root is fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::cancel::CancelFlag;
use crate::document::{extract_frontmatter, Document};
use crate::error::{Error, Result};
use crate::ignore::IgnoreFilter;
use crate::sink::{TracingSink, WarningSink};

/// Discovers and parses Markdown files under a root directory.
pub struct Scanner {
    root: PathBuf,
    filter: IgnoreFilter,
    sink: Arc<dyn WarningSink>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("root", &self.root)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Create a scanner for the given root and ignore patterns.
    ///
    /// Fails when the root is empty, does not exist, or is not a directory.
    pub fn new(root: impl AsRef<Path>, ignore_patterns: &[String]) -> Result<Self> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(Error::EmptyRoot);
        }

        let root = root.canonicalize().map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;

        if !root.is_dir() {
            return Err(Error::RootNotDirectory { path: root });
        }

        Ok(Self {
            root,
            filter: IgnoreFilter::new(ignore_patterns),
            sink: Arc::new(TracingSink),
        })
    }

    /// Replace the warning sink (the default forwards to `tracing`).
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The resolved scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and return all accepted documents in walk order.
    ///
    /// The walk is sorted by file name so the order is deterministic across
    /// hosts. Cancellation is observed before each file.
    pub fn scan(&self, cancel: &CancelFlag) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            if cancel.is_cancelled() {
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.sink.warn(&format!("skipping unreadable entry: {err}"));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !name.to_lowercase().ends_with(".md") {
                continue;
            }

            let path = entry.path();
            let relative = relative_path(&self.root, path);
            if self.filter.should_ignore(&relative) {
                continue;
            }

            match self.read_document(path, &relative) {
                Ok(doc) => documents.push(doc),
                Err(err) => {
                    self.sink.warn(&format!("skipping {relative}: {err}"));
                }
            }
        }

        Ok(documents)
    }

    /// Read and parse a single file by path.
    pub fn scan_one(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let relative = relative_path(&self.root, path);
        self.read_document(path, &relative)
    }

    fn read_document(&self, path: &Path, relative: &str) -> Result<Document> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = std::fs::metadata(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let modified: DateTime<Utc> = metadata
            .modified()
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        // A relative path of "." means the root itself was passed
        let relative = if relative == "." {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| relative.to_string())
        } else {
            relative.to_string()
        };

        let (frontmatter, body) = extract_frontmatter(&content);

        let mut doc = Document {
            id: document_id(&relative),
            path: path.to_path_buf(),
            relative_path: relative,
            title: String::new(),
            body: body.to_string(),
            modified,
            metadata: frontmatter,
            sections: Vec::new(),
            links: Vec::new(),
            code_blocks: Vec::new(),
        };

        doc.title = doc.extract_title();
        doc.sections = doc.extract_sections();
        doc.links = doc.extract_links();
        doc.code_blocks = doc.extract_code_blocks();

        Ok(doc)
    }
}

/// Stable document identifier: SHA-256 hex of the relative path.
fn document_id(relative_path: &str) -> String {
    format!("{:x}", Sha256::digest(relative_path.as_bytes()))
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let text = relative.to_string_lossy().replace('\\', "/");
    if text.is_empty() {
        ".".to_string()
    } else {
        text
    }
}
