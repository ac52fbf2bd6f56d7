//! YAML project configuration parsing and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level project configuration. Unknown keys are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
}

/// Header material for the index and full-concatenation exports.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default = "default_project_description")]
    pub description: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            description: default_project_description(),
        }
    }
}

fn default_project_name() -> String {
    "Documentation".to_string()
}

fn default_project_description() -> String {
    "Project documentation".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Root directories to scan for Markdown files.
    #[serde(default = "default_input_paths")]
    pub paths: Vec<PathBuf>,
    /// Gitignore-style exclusion patterns applied to relative paths.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            paths: default_input_paths(),
            ignore: Vec::new(),
        }
    }
}

fn default_input_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./dist")
}

/// Chunking limits used by the LLM exports.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    512
}

fn default_overlap() -> usize {
    128
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeaturesConfig {
    /// Whether `build` writes llms.txt and llms-full.txt.
    #[serde(default = "default_llm_export")]
    pub llm_export: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            llm_export: default_llm_export(),
        }
    }
}

fn default_llm_export() -> bool {
    true
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.llm.chunk_size == 0 {
        return Err(Error::InvalidConfig {
            message: "llm.chunk_size must be > 0".to_string(),
        });
    }
    if config.llm.overlap >= config.llm.chunk_size {
        return Err(Error::InvalidConfig {
            message: format!(
                "llm.overlap ({}) must be less than llm.chunk_size ({})",
                config.llm.overlap, config.llm.chunk_size
            ),
        });
    }
    if config.input.paths.is_empty() {
        return Err(Error::InvalidConfig {
            message: "input.paths must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<Config> {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docpack.yaml");
        fs::write(&path, content).unwrap();
        load_config(&path)
    }

    #[test]
    fn full_config_parses() {
        let config = load(
            r#"
project:
  name: Test Project
  description: A test project
input:
  paths:
    - docs
  ignore:
    - "drafts/"
output:
  path: out
llm:
  chunk_size: 256
  overlap: 32
features:
  llm_export: false
"#,
        )
        .unwrap();

        assert_eq!(config.project.name, "Test Project");
        assert_eq!(config.input.paths, vec![PathBuf::from("docs")]);
        assert_eq!(config.input.ignore, vec!["drafts/"]);
        assert_eq!(config.output.path, PathBuf::from("out"));
        assert_eq!(config.llm.chunk_size, 256);
        assert_eq!(config.llm.overlap, 32);
        assert!(!config.features.llm_export);
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let config = load("project:\n  name: Minimal\n").unwrap();
        assert_eq!(config.project.name, "Minimal");
        assert_eq!(config.project.description, "Project documentation");
        assert_eq!(config.input.paths, vec![PathBuf::from(".")]);
        assert_eq!(config.output.path, PathBuf::from("./dist"));
        assert_eq!(config.llm.chunk_size, 512);
        assert_eq!(config.llm.overlap, 128);
        assert!(config.features.llm_export);
    }

    #[test]
    fn unknown_keys_ignored() {
        let config = load("project:\n  name: X\nsearch:\n  enabled: true\n").unwrap();
        assert_eq!(config.project.name, "X");
    }

    #[test]
    fn overlap_must_be_less_than_chunk_size() {
        let err = load("llm:\n  chunk_size: 100\n  overlap: 100\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = load("llm:\n  chunk_size: 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
