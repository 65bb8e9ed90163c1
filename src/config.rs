// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub autocomplete: AutocompleteConfig,
    pub cache: CacheConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// JSON corpus file, or a directory of JSON files
    pub corpus_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub min_query_chars: usize,
    pub default_limit: usize,
    pub max_limit: usize,
    /// Candidates fetched per scan phase = limit * overfetch_factor
    pub overfetch_factor: usize,
    pub description_max_chars: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutocompleteConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub field_scan_limit: usize,
    pub content_scan_limit: usize,
    pub include_content: bool,
    pub include_phrases: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub refresh_timeout_secs: u64,
}

/// Heuristic weights for relevance scoring.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub title: f64,
    pub institution: f64,
    pub tags: f64,
    pub keywords: f64,
    pub description: f64,
    pub content_occurrence: f64,
    pub density_scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title: 10.0,
            institution: 5.0,
            tags: 3.0,
            keywords: 2.0,
            description: 1.0,
            content_occurrence: 0.5,
            density_scale: 100.0,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AutocompleteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LEGAL_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                corpus_path: PathBuf::from("data/corpus.json"),
            },
            search: SearchConfig {
                min_query_chars: 2,
                default_limit: 20,
                max_limit: 100,
                overfetch_factor: 2,
                description_max_chars: 200,
                timeout_secs: 30,
            },
            autocomplete: AutocompleteConfig {
                default_limit: 10,
                max_limit: 50,
                field_scan_limit: 100,
                content_scan_limit: 5,
                include_content: true,
                include_phrases: false,
                timeout_secs: 10,
            },
            cache: CacheConfig {
                refresh_timeout_secs: 5,
            },
            scoring: ScoringConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.min_query_chars == 0 {
            return Err(SearchError::Config(
                "search.min_query_chars must be greater than 0".to_string(),
            ));
        }

        for (name, default, max) in [
            ("search", self.search.default_limit, self.search.max_limit),
            (
                "autocomplete",
                self.autocomplete.default_limit,
                self.autocomplete.max_limit,
            ),
        ] {
            if default == 0 || default > max {
                return Err(SearchError::Config(format!(
                    "{name}.default_limit must be within 1..={max}"
                )));
            }
        }

        if self.search.overfetch_factor == 0 {
            return Err(SearchError::Config(
                "search.overfetch_factor must be greater than 0".to_string(),
            ));
        }

        if self.search.timeout_secs == 0
            || self.autocomplete.timeout_secs == 0
            || self.cache.refresh_timeout_secs == 0
        {
            return Err(SearchError::Config(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[database]
corpus_path = "fixtures/corpus.json"

[search]
min_query_chars = 2
default_limit = 20
max_limit = 100
overfetch_factor = 2
description_max_chars = 200
timeout_secs = 30

[autocomplete]
default_limit = 10
max_limit = 50
field_scan_limit = 100
content_scan_limit = 5
include_content = true
include_phrases = false
timeout_secs = 10

[cache]
refresh_timeout_secs = 5

[scoring]
title = 12.0
"#;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(
            config.database.corpus_path,
            PathBuf::from("fixtures/corpus.json")
        );
        assert_eq!(config.search.timeout(), Duration::from_secs(30));
        assert_eq!(config.scoring.title, 12.0);
        // unspecified weights fall back to defaults
        assert_eq!(config.scoring.tags, 3.0);
    }

    #[test]
    fn test_validate_rejects_default_above_max() {
        let mut config = Config::default_config();
        config.autocomplete.default_limit = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default_config().validate().is_ok());
    }
}
