//! Configuration loaded from YAML
//!
//! Every section falls back to its defaults, so a partial file (or none at
//! all) is valid.

use crate::directory::DEFAULT_RESULT_SIZE;
use crate::graph::{TraversalBudget, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Graph construction limits and defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Degrees of separation expanded below the root
    pub max_depth: u32,
    /// Nodes on screen at once
    pub max_nodes: usize,
    /// Rows returned by one directory lookup
    pub result_size: usize,
    /// Directory lookups allowed in one pass
    pub max_queries: usize,
    /// Wall-clock ceiling for one pass, 0 disables it
    pub time_limit_ms: u64,
    /// Root of the landing tree for viewers not found in the directory
    pub top_node: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            result_size: DEFAULT_RESULT_SIZE,
            max_queries: 2_000,
            time_limit_ms: 5_000,
            top_node: "David_Walker".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn budget(&self) -> TraversalBudget {
        TraversalBudget::new(self.max_depth, self.max_nodes)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}

/// HTTP bind settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Where the directory comes from
///
/// With `sqlite_path` set the CSV files (if any) are imported into that
/// database on startup; otherwise they are served from memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub hierarchy_csv: Option<PathBuf>,
    pub custom_csv: Option<PathBuf>,
    pub sqlite_path: Option<PathBuf>,
    pub connect_attempts: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            hierarchy_csv: None,
            custom_csv: None,
            sqlite_path: None,
            connect_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgraphConfig {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
}

impl OrgraphConfig {
    /// Read and validate a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults when no path is given
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let engine = &self.engine;
        if engine.max_depth == 0 {
            return Err(ConfigError::Invalid("engine.max_depth must be at least 1".into()));
        }
        if engine.max_nodes == 0 {
            return Err(ConfigError::Invalid("engine.max_nodes must be at least 1".into()));
        }
        if engine.result_size == 0 {
            return Err(ConfigError::Invalid("engine.result_size must be at least 1".into()));
        }
        if self.directory.connect_attempts == 0 {
            return Err(ConfigError::Invalid("directory.connect_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_carry_source_limits() {
        let config = OrgraphConfig::default();
        assert_eq!(config.engine.budget(), TraversalBudget::new(5, 100));
        assert_eq!(config.engine.result_size, 400);
        assert_eq!(config.engine.top_node, "David_Walker");
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.directory.connect_attempts, 3);
    }

    #[test]
    fn test_partial_yaml() {
        let config = OrgraphConfig::from_yaml("engine:\n  max_nodes: 50\nserver:\n  port: 9000\n").unwrap();
        assert_eq!(config.engine.max_nodes, 50);
        assert_eq!(config.engine.max_depth, 5);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.address, "127.0.0.1");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(OrgraphConfig::from_yaml("").unwrap(), OrgraphConfig::default());
    }

    #[test]
    fn test_rejects_zero_limits() {
        let err = OrgraphConfig::from_yaml("engine:\n  max_depth: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_time_limit() {
        let mut engine = EngineConfig::default();
        assert_eq!(engine.time_limit(), Some(Duration::from_secs(5)));
        engine.time_limit_ms = 0;
        assert_eq!(engine.time_limit(), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "directory:\n  hierarchy_csv: ./org.csv\n  connect_attempts: 5").unwrap();

        let config = OrgraphConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.directory.hierarchy_csv, Some(PathBuf::from("./org.csv")));
        assert_eq!(config.directory.connect_attempts, 5);
        assert!(OrgraphConfig::load(None).is_ok());
    }
}
