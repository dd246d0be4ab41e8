//! Layer command-line overrides on top of file configuration.

use crate::domain::{Config, ParserBackend};
use std::path::PathBuf;

/// Settings given on the command line. `None` leaves the file value (or default) in place.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub exclude_globs: Option<Vec<String>>,
    pub respect_gitignore: Option<bool>,
    pub include_timestamp: Option<bool>,
    pub include_prompt: Option<bool>,
    pub tree_depth: Option<usize>,
    pub parser: Option<ParserBackend>,
}

/// Apply `cli` to `config`. Exclusion patterns from both sources are combined, file ones first.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = Some(output_dir);
    }
    if let Some(patterns) = cli.exclude_globs {
        for pattern in patterns {
            if !config.exclude_globs.contains(&pattern) {
                config.exclude_globs.push(pattern);
            }
        }
    }
    if let Some(respect) = cli.respect_gitignore {
        config.respect_gitignore = respect;
    }
    if let Some(include) = cli.include_timestamp {
        config.include_timestamp = include;
    }
    if let Some(include) = cli.include_prompt {
        config.include_prompt = include;
    }
    if let Some(depth) = cli.tree_depth {
        config.tree_max_depth = Some(depth);
    }
    if let Some(parser) = cli.parser {
        config.parser = parser;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_file_config() {
        let file = Config {
            respect_gitignore: false,
            tree_max_depth: Some(2),
            parser: ParserBackend::TreeSitter,
            ..Config::default()
        };
        let merged = merge_cli_with_config(file.clone(), CliOverrides::default());
        assert_eq!(merged, file);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = Config {
            output_dir: Some(PathBuf::from("from-file")),
            tree_max_depth: Some(2),
            include_prompt: true,
            ..Config::default()
        };
        let cli = CliOverrides {
            output_dir: Some(PathBuf::from("from-cli")),
            tree_depth: Some(5),
            include_prompt: Some(false),
            parser: Some(ParserBackend::TreeSitter),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(file, cli);
        assert_eq!(merged.output_dir, Some(PathBuf::from("from-cli")));
        assert_eq!(merged.tree_max_depth, Some(5));
        assert!(!merged.include_prompt);
        assert_eq!(merged.parser, ParserBackend::TreeSitter);
        assert!(merged.respect_gitignore);
    }

    #[test]
    fn test_exclude_globs_are_combined_without_duplicates() {
        let file = Config {
            exclude_globs: vec!["build/".to_string(), "*.gen.py".to_string()],
            ..Config::default()
        };
        let cli = CliOverrides {
            exclude_globs: Some(vec!["*.gen.py".to_string(), "scratch/".to_string()]),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(file, cli);
        assert_eq!(merged.exclude_globs, vec!["build/", "*.gen.py", "scratch/"]);
    }
}
