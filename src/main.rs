//! # docpack CLI
//!
//! Commands for turning a Markdown corpus into LLM-oriented exports.
//!
//! ## Usage
//!
//! ```bash
//! docpack --config ./docpack.yaml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docpack build` | Scan configured inputs and write `llms.txt` + `llms-full.txt` |
//! | `docpack export` | Emit one form (`llms-txt`, `llms-full`, `jsonl`, `markdown`) to a file or stdout |
//!
//! ## Examples
//!
//! ```bash
//! # Write llms.txt and llms-full.txt into the configured output directory
//! docpack build
//!
//! # Export chunks for RAG ingestion
//! docpack export --for-rag --output docs.jsonl
//!
//! # Enriched markdown with header-based chunk limits
//! docpack export --format markdown --output docs.md
//!
//! # JSONL with custom chunking
//! docpack export --format jsonl --strategy recursive --chunk-size 1024 --chunk-overlap 256 --output chunks.jsonl
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use docpack::cancel::CancelFlag;
use docpack::chunking;
use docpack::config::{self, Config};
use docpack::document::Document;
use docpack::export;
use docpack::scanner::Scanner;
use docpack::sink::TracingSink;

/// docpack — a Markdown corpus scanner and LLM-oriented export toolchain.
///
/// All commands accept a `--config` flag pointing to a YAML configuration
/// file with the project name, input paths, ignore patterns, output
/// directory, and chunking limits.
#[derive(Parser)]
#[command(
    name = "docpack",
    about = "Turn a Markdown corpus into llms.txt, llms-full.txt, JSONL, and enriched-Markdown exports",
    version
)]
struct Cli {
    /// Path to the YAML configuration file.
    ///
    /// Defaults to `./docpack.yaml`. When the file does not exist, built-in
    /// defaults are used.
    #[arg(long, global = true, default_value = "./docpack.yaml")]
    config: PathBuf,

    /// Enable debug-level logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the configured inputs and write the llms.txt exports.
    ///
    /// Writes `llms.txt` (index form) and `llms-full.txt` (full
    /// concatenation) into the configured output directory. Controlled by
    /// `features.llm_export` in the configuration.
    Build {
        /// Output directory (overrides `output.path` from the config).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Skip generation of llms.txt and llms-full.txt.
        #[arg(long)]
        skip_llms_txt: bool,
    },

    /// Export documentation in a single format.
    ///
    /// Scans the configured inputs and emits one export form to a file or
    /// stdout.
    Export {
        /// Export format: llms-txt, llms-full, jsonl, markdown.
        #[arg(long, short, default_value = "llms-txt")]
        format: String,

        /// Output file (default: stdout).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Chunking strategy: fixed, headers, markdown-headers, recursive, semantic.
        #[arg(long, short, default_value = chunking::DEFAULT_STRATEGY)]
        strategy: String,

        /// Maximum tokens per chunk (must be >0 and <=2048).
        #[arg(long, default_value_t = 512)]
        chunk_size: usize,

        /// Token overlap between chunks (must be <chunk-size).
        #[arg(long, default_value_t = 128)]
        chunk_overlap: usize,

        /// Preset for RAG: jsonl format, semantic strategy, 512-token chunks.
        #[arg(long)]
        for_rag: bool,

        /// Preset for context windows: markdown format, headers strategy, 1024-token chunks.
        #[arg(long)]
        for_context: bool,

        /// Preset for training data: jsonl format, fixed strategy, 256-token chunks.
        #[arg(long)]
        for_training: bool,
    },
}

const EXPORT_FORMATS: &[&str] = &["llms-txt", "llms-full", "jsonl", "markdown"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.verbose)?;

    let config = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Build {
            output,
            skip_llms_txt,
        } => run_build(&config, output, skip_llms_txt),
        Commands::Export {
            format,
            output,
            strategy,
            chunk_size,
            chunk_overlap,
            for_rag,
            for_context,
            for_training,
        } => run_export(
            &config,
            ExportArgs {
                format,
                output,
                strategy,
                chunk_size,
                chunk_overlap,
                for_rag,
                for_context,
                for_training,
            },
        ),
    }
}

fn initialize_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run_build(config: &Config, output: Option<PathBuf>, skip_llms_txt: bool) -> Result<()> {
    let start = Instant::now();

    let output_path = output.unwrap_or_else(|| config.output.path.clone());
    std::fs::create_dir_all(&output_path)
        .with_context(|| format!("failed to create output directory {}", output_path.display()))?;

    println!("Scanning for markdown files...");
    let documents = scan_inputs(config)?;
    println!("  Found {} markdown files\n", documents.len());

    if config.features.llm_export && !skip_llms_txt {
        println!("Generating llms.txt...");

        let index = export::build_index(&documents, &config.project);
        let index_path = output_path.join("llms.txt");
        std::fs::write(&index_path, &index)
            .with_context(|| format!("failed to write {}", index_path.display()))?;
        println!("  Created llms.txt ({})", humanize_bytes(index.len()));

        let full = export::build_full(
            &documents,
            &config.project,
            &TracingSink,
            &CancelFlag::new(),
        );
        let full_path = output_path.join("llms-full.txt");
        std::fs::write(&full_path, &full)
            .with_context(|| format!("failed to write {}", full_path.display()))?;
        println!("  Created llms-full.txt ({})", humanize_bytes(full.len()));
        println!();
    }

    println!("Build completed in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

struct ExportArgs {
    format: String,
    output: Option<PathBuf>,
    strategy: String,
    chunk_size: usize,
    chunk_overlap: usize,
    for_rag: bool,
    for_context: bool,
    for_training: bool,
}

fn run_export(config: &Config, mut args: ExportArgs) -> Result<()> {
    validate_export_args(&args)?;
    apply_preset(&mut args);

    println!("Scanning for markdown files...");
    let documents = scan_inputs(config)?;
    println!("  Found {} markdown files\n", documents.len());

    let cancel = CancelFlag::new();
    let output = match args.format.as_str() {
        "llms-txt" => {
            println!("Exporting to llms.txt format...");
            export::build_index(&documents, &config.project)
        }
        "llms-full" => {
            println!("Exporting to llms-full.txt format...");
            export::build_full(&documents, &config.project, &TracingSink, &cancel)
        }
        "jsonl" => {
            println!(
                "Exporting to JSONL (strategy: {}, chunk-size: {}, overlap: {})...",
                args.strategy, args.chunk_size, args.chunk_overlap
            );
            export::build_jsonl(
                &documents,
                &args.strategy,
                args.chunk_size,
                args.chunk_overlap,
                &cancel,
            )?
        }
        "markdown" => {
            println!("Exporting to enriched markdown...");
            export::build_markdown(&documents, &cancel)?
        }
        other => bail!(
            "unsupported format: {other} (supported: {})",
            EXPORT_FORMATS.join(", ")
        ),
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create output directory {}", parent.display())
                    })?;
                }
            }
            std::fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported to {} ({})", path.display(), humanize_bytes(output.len()));
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn validate_export_args(args: &ExportArgs) -> Result<()> {
    let presets = [args.for_rag, args.for_context, args.for_training]
        .iter()
        .filter(|p| **p)
        .count();
    if presets > 1 {
        bail!(
            "cannot use multiple presets together (--for-rag, --for-context, --for-training are mutually exclusive)\n\n\
             Examples:\n  docpack export --for-rag --output docs.jsonl\n  docpack export --for-context --output docs.md"
        );
    }

    if args.chunk_size == 0 || args.chunk_size > 2048 {
        bail!(
            "chunk-size must be >0 and <=2048 (got {})\n\nExample:\n  docpack export --format jsonl --chunk-size 512 --output docs.jsonl",
            args.chunk_size
        );
    }
    if args.chunk_overlap > 2048 {
        bail!(
            "chunk-overlap must be <=2048 (got {})\n\nExample:\n  docpack export --format jsonl --chunk-overlap 128 --output docs.jsonl",
            args.chunk_overlap
        );
    }
    if args.chunk_overlap >= args.chunk_size {
        bail!(
            "chunk-overlap ({}) must be less than chunk-size ({})\n\nExample:\n  docpack export --format jsonl --chunk-size 512 --chunk-overlap 128 --output docs.jsonl",
            args.chunk_overlap,
            args.chunk_size
        );
    }

    if !EXPORT_FORMATS.contains(&args.format.as_str()) {
        bail!(
            "unsupported format: {} (supported: {})\n\nExample:\n  docpack export --format llms-txt --output llms.txt",
            args.format,
            EXPORT_FORMATS.join(", ")
        );
    }
    if !chunking::STRATEGIES.contains(&args.strategy.as_str()) {
        bail!(
            "unsupported strategy: {} (supported: {})\n\nExample:\n  docpack export --format jsonl --strategy semantic --output docs.jsonl",
            args.strategy,
            chunking::STRATEGIES.join(", ")
        );
    }

    Ok(())
}

fn apply_preset(args: &mut ExportArgs) {
    if args.for_rag {
        args.format = "jsonl".to_string();
        args.strategy = "semantic".to_string();
        args.chunk_size = 512;
        args.chunk_overlap = 128;
        println!("Using RAG preset: jsonl format, semantic strategy, 512 token chunks");
    } else if args.for_context {
        args.format = "markdown".to_string();
        args.strategy = "headers".to_string();
        args.chunk_size = 1024;
        args.chunk_overlap = 256;
        println!("Using context preset: markdown format, headers strategy, 1024 token chunks");
    } else if args.for_training {
        args.format = "jsonl".to_string();
        args.strategy = "fixed".to_string();
        args.chunk_size = 256;
        args.chunk_overlap = 64;
        println!("Using training preset: jsonl format, fixed strategy, 256 token chunks");
    }
}

fn scan_inputs(config: &Config) -> Result<Vec<Document>> {
    let cancel = CancelFlag::new();
    let mut documents = Vec::new();

    for input in &config.input.paths {
        if !input.exists() {
            tracing::warn!("skipping missing input path {}", input.display());
            continue;
        }

        let scanner = Scanner::new(input, &config.input.ignore)
            .with_context(|| format!("failed to create scanner for {}", input.display()))?;
        let docs = scanner
            .scan(&cancel)
            .with_context(|| format!("failed to scan {}", input.display()))?;
        documents.extend(docs);
    }

    if documents.is_empty() {
        bail!("no markdown files found");
    }

    Ok(documents)
}

fn humanize_bytes(bytes: usize) -> String {
    const UNIT: f64 = 1024.0;
    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64 / UNIT;
    for unit in ["KB", "MB", "GB", "TB"] {
        if value < UNIT {
            return format!("{value:.1}{unit}");
        }
        value /= UNIT;
    }
    format!("{value:.1}PB")
}
