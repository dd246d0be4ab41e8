//! Run configuration as read from config files and overridden by the CLI.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_collected_code.txt";

/// Which import extractor parses source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ParserBackend {
    #[default]
    #[serde(rename = "rustpython")]
    RustPython,
    #[serde(rename = "tree-sitter", alias = "treesitter")]
    TreeSitter,
}

impl fmt::Display for ParserBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserBackend::RustPython => f.write_str("rustpython"),
            ParserBackend::TreeSitter => f.write_str("tree-sitter"),
        }
    }
}

impl FromStr for ParserBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rustpython" => Ok(ParserBackend::RustPython),
            "tree-sitter" | "treesitter" => Ok(ParserBackend::TreeSitter),
            other => Err(format!(
                "Invalid parser backend '{}'. Expected 'rustpython' or 'tree-sitter'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the bundle is written to; `None` means the working directory.
    pub output_dir: Option<PathBuf>,
    pub output_suffix: String,
    pub respect_gitignore: bool,
    /// Extra gitignore-syntax patterns applied on top of `.gitignore`.
    #[serde(deserialize_with = "deserialize_patterns")]
    pub exclude_globs: Vec<String>,
    pub include_timestamp: bool,
    pub include_prompt: bool,
    pub tree_max_depth: Option<usize>,
    pub parser: ParserBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            respect_gitignore: true,
            exclude_globs: Vec::new(),
            include_timestamp: true,
            include_prompt: true,
            tree_max_depth: None,
            parser: ParserBackend::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    Csv(String),
    List(Vec<String>),
}

/// Accept either `"a, b"` or `["a", "b"]`, trimming entries and dropping empty ones.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match StringOrList::deserialize(deserializer)? {
        StringOrList::Csv(value) => value.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::List(values) => values,
    };
    Ok(raw
        .into_iter()
        .map(|pattern| pattern.trim().to_string())
        .filter(|pattern| !pattern.is_empty())
        .collect())
}
