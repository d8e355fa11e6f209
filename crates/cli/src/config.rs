//! Configuration file format for `rehydrate`.
//!
//! Loaded from the path given with `--config`, or from `rehydrate.toml` in
//! the working directory when that file exists. Every section is optional.
//!
//! # Example
//!
//! ```toml
//! [partition]
//! include_metadata = true
//! infer_timestamp_from_stream = false
//! metadata_last_modified = "2024-01-01T00:00:00"
//!
//! [chunking]
//! strategy = "by_title"
//! max_characters = 500
//! new_after_n_chars = 400
//!
//! [normalize]
//! assign_parent_ids = true
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use rehydrate_chunking::ChunkingOptions;
use rehydrate_partition::PartitionJsonOptions;
use serde::Deserialize;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "rehydrate.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub partition: PartitionJsonOptions,
    /// Chunking is enabled only when this section is present.
    pub chunking: Option<ChunkingOptions>,
    pub normalize: NormalizeSection,
    pub logging: LoggingSection,
}

/// `[normalize]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NormalizeSection {
    pub assign_parent_ids: bool,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingSection {
    /// A tracing filter directive such as `"info"` or `"rehydrate_partition=debug"`.
    pub level: Option<String>,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Load the configuration.
///
/// An explicit path must exist. Without one, `rehydrate.toml` in the current
/// directory is used if present, otherwise defaults apply.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                read_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

pub(crate) fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehydrate_chunking::ChunkingStrategy;

    #[test]
    fn empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert!(config.partition.include_metadata);
        assert!(config.chunking.is_none());
        assert!(!config.normalize.assign_parent_ids);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"
[partition]
include_metadata = false
infer_timestamp_from_stream = true
metadata_last_modified = "2024-01-01T00:00:00"

[chunking]
strategy = "by_title"
max_characters = 300
new_after_n_chars = 200

[normalize]
assign_parent_ids = true

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert!(!config.partition.include_metadata);
        assert!(config.partition.infer_timestamp_from_stream);
        assert_eq!(
            config.partition.metadata_last_modified.as_deref(),
            Some("2024-01-01T00:00:00")
        );
        let chunking = config.chunking.unwrap();
        assert_eq!(chunking.strategy, ChunkingStrategy::ByTitle);
        assert_eq!(chunking.max_characters, 300);
        assert_eq!(chunking.new_after_n_chars, 200);
        assert!(config.normalize.assign_parent_ids);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(parse_config("[server]\nport = 1").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/rehydrate.toml"))).unwrap_err();
        assert!(err.contains("could not read"));
    }
}
