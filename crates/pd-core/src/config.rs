//! Configuration types and parsing for pitchdata.yml

use crate::error::{CoreError, CoreResult};
use crate::schema::Relation;
use crate::serde_helpers::{default_data_dir, default_db_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database path selecting the ephemeral in-memory store
pub const MEMORY_DB_PATH: &str = ":memory:";

/// Pipeline configuration from pitchdata.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the source CSV files, relative to the config file
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Source file name per relation
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Store persistence configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Source file names, one per relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default = "default_results_file")]
    pub results: String,

    #[serde(default = "default_goalscorers_file")]
    pub goalscorers: String,

    #[serde(default = "default_shootouts_file")]
    pub shootouts: String,

    #[serde(default = "default_former_names_file")]
    pub former_names: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            results: default_results_file(),
            goalscorers: default_goalscorers_file(),
            shootouts: default_shootouts_file(),
            former_names: default_former_names_file(),
        }
    }
}

impl SourcesConfig {
    /// File name configured for `relation`
    pub fn file_name(&self, relation: Relation) -> &str {
        match relation {
            Relation::Result => &self.results,
            Relation::Goalscorer => &self.goalscorers,
            Relation::Shootout => &self.shootouts,
            Relation::FormerName => &self.former_names,
        }
    }
}

fn default_results_file() -> String {
    Relation::Result.default_file_name().to_string()
}

fn default_goalscorers_file() -> String {
    Relation::Goalscorer.default_file_name().to_string()
}

fn default_shootouts_file() -> String {
    Relation::Shootout.default_file_name().to_string()
}

fn default_former_names_file() -> String {
    Relation::FormerName.default_file_name().to_string()
}

/// Store persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Durable DuckDB file path, or `:memory:` for an ephemeral store
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the store lives only in memory
    pub fn is_ephemeral(&self) -> bool {
        self.path == MEMORY_DB_PATH
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sources: SourcesConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!(
            "Loaded config from {} (data_dir: {}, database: {})",
            path.display(),
            config.data_dir,
            config.database.path
        );
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for pitchdata.yml or pitchdata.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("pitchdata.yml");
        let yaml_path = dir.join("pitchdata.yaml");

        if yml_path.exists() {
            if yaml_path.exists() {
                log::warn!(
                    "Both {} and {} exist; using {}",
                    yml_path.display(),
                    yaml_path.display(),
                    yml_path.display()
                );
            }
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "data_dir cannot be empty".to_string(),
            });
        }

        for relation in Relation::ALL {
            if self.sources.file_name(relation).trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "sources.{} cannot be empty",
                        relation.config_key()
                    ),
                });
            }
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty (use \":memory:\" for an ephemeral store)"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Absolute data directory relative to a root directory
    pub fn data_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.data_dir)
    }

    /// Source paths for every relation, in load order
    pub fn source_paths(&self, root: &Path) -> Vec<(Relation, PathBuf)> {
        let data_dir = self.data_dir_absolute(root);
        Relation::ALL
            .iter()
            .map(|&r| (r, data_dir.join(self.sources.file_name(r))))
            .collect()
    }

    /// Durable database path relative to a root directory, `None` when ephemeral
    pub fn database_path(&self, root: &Path) -> Option<PathBuf> {
        if self.database.is_ephemeral() {
            None
        } else {
            Some(root.join(&self.database.path))
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
