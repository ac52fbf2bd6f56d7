//! # docpack
//!
//! **A Markdown corpus scanner and LLM-oriented export toolchain.**
//!
//! docpack ingests a directory tree of Markdown files and emits
//! representations consumable by large language models and vector databases:
//! an `llms.txt` index, an `llms-full.txt` concatenation, a JSONL chunk
//! stream, and an enriched-Markdown bundle with per-document metadata
//! headers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────────┐   ┌───────────┐
//! │ Scanner  │──▶│ Documents │──▶│ Chunk engine │──▶│ Exporters │
//! │ + ignore │   │ +sections │   │ fixed/headers│   │ txt/jsonl │
//! └──────────┘   └───────────┘   │ recursive/.. │   │ /markdown │
//!                                └──────────────┘   └───────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. The **scanner** ([`scanner`]) walks a root directory, applies
//!    gitignore-style patterns ([`ignore`]), strips YAML frontmatter, and
//!    produces immutable [`document::Document`]s with extracted sections,
//!    links, and code blocks.
//! 2. A **chunking strategy** ([`chunking`]) splits document bodies into
//!    token-bounded [`chunking::Chunk`]s, sized with the `cl100k_base`
//!    tokenizer ([`tokenizer`]).
//! 3. The **exporters** ([`export`]) turn documents (and chunks) into the
//!    four output forms. Warnings (skipped files, oversize exports) flow
//!    through a [`sink::WarningSink`]; long loops observe a
//!    [`cancel::CancelFlag`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | YAML project configuration parsing and validation |
//! | [`document`] | Core data types and Markdown structure extraction |
//! | [`ignore`] | Gitignore-style path exclusion |
//! | [`scanner`] | Filesystem walk producing documents |
//! | [`tokenizer`] | `cl100k_base` token counting behind a capability trait |
//! | [`chunking`] | Pluggable chunking strategies and the strategy factory |
//! | [`export`] | The four export forms and the orchestrator entry points |
//! | [`sink`] | Warning sink capability |
//! | [`cancel`] | Cooperative cancellation flag |
//! | [`error`] | Structured error type shared by the library |

pub mod cancel;
pub mod chunking;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod ignore;
pub mod scanner;
pub mod sink;
pub mod tokenizer;

pub use error::{Error, Result};
