//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use docpack::tokenizer::TokenCounter;

/// Deterministic counter: one token per whitespace-separated word.
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn encode(&self, text: &str) -> Vec<usize> {
        text.split_whitespace().enumerate().map(|(i, _)| i).collect()
    }
}

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Lay down a small documentation corpus.
pub fn write_corpus(root: &Path) {
    write_file(
        root,
        "README.md",
        "# Project\n\nThe main entry point for the documentation.\n",
    );
    write_file(
        root,
        "docs/guide.md",
        "---\ntitle: User Guide\n---\n# Guide\n\n## Install\n\nRun the installer.\n\n## Configure\n\nEdit the config file.\n",
    );
    write_file(
        root,
        "docs/api.md",
        "# API\n\nEndpoints and [schemas](schemas.md) live here.\n\n```json\n{}\n```\n",
    );
    write_file(root, "drafts/wip.md", "# WIP\n\nNot ready.\n");
    write_file(root, "notes.txt", "not markdown\n");
}
