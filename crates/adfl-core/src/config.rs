//! Configuration types and parsing for adfl.yml

use crate::error::{CoreError, CoreResult};
use adfl_sql::SqlParser;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "adfl.yml";

/// Extraction configuration from adfl.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Days of pipeline-run history to search; below 1 no pipeline is processed
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Prefix table names with their linked service's host identity
    #[serde(default = "default_true")]
    pub use_fqn: bool,

    /// OpenLineage namespace for jobs and datasets
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// OpenLineage producer string
    #[serde(default = "default_producer")]
    pub producer: String,

    /// Path of the OpenLineage event document
    #[serde(default = "default_openlineage_output")]
    pub openlineage_output: String,

    /// Path of the plain edge-list document
    #[serde(default = "default_lineage_output")]
    pub lineage_output: String,

    /// Which pipelines' edges go into the edge-list document
    #[serde(default)]
    pub edge_list_scope: EdgeListScope,

    /// Dialect for every reader query, overriding the per-source default
    #[serde(default)]
    pub sql_dialect: Option<String>,

    /// Only process pipelines referenced by a started trigger
    #[serde(default)]
    pub only_triggered: bool,

    /// Add indirect ancestors to each edge's parents within a pipeline
    #[serde(default)]
    pub transitive: bool,

    /// Directory holding the exported factory resources
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

/// Edge-list document contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeListScope {
    /// Edges of the last processed pipeline only
    #[default]
    Last,
    /// Edges of every processed pipeline, in processing order
    All,
}

fn default_true() -> bool {
    true
}

fn default_lookback_days() -> i64 {
    1
}

fn default_namespace() -> String {
    "my-namespace".to_string()
}

fn default_producer() -> String {
    "azure-lineage".to_string()
}

fn default_openlineage_output() -> String {
    "openlineage.json".to_string()
}

fn default_lineage_output() -> String {
    "lineage.json".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            use_fqn: true,
            namespace: default_namespace(),
            producer: default_producer(),
            openlineage_output: default_openlineage_output(),
            lineage_output: default_lineage_output(),
            edge_list_scope: EdgeListScope::default(),
            sql_dialect: None,
            only_triggered: false,
            transitive: false,
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or `adfl.yml` from the working
    /// directory when present, or fall back to defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "namespace cannot be empty".to_string(),
            });
        }

        if self.producer.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "producer cannot be empty".to_string(),
            });
        }

        for (key, value) in [
            ("openlineage_output", &self.openlineage_output),
            ("lineage_output", &self.lineage_output),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{} cannot be empty", key),
                });
            }
        }

        if let Some(dialect) = &self.sql_dialect {
            SqlParser::from_dialect_name(dialect).map_err(|e| CoreError::ConfigInvalid {
                message: format!("sql_dialect: {}", e),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
