use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::store::{KeyValueStore, MemoryStore, NoopStore, SqliteStore};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the job-board API
  pub url: String,
}

/// Which backend holds the session cache slots.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
  /// In-memory map
  #[default]
  Memory,
  /// In-memory SQLite database
  Sqlite,
  /// Caching disabled - every load goes to the remote
  None,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
  #[serde(default)]
  pub backend: CacheBackend,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./jobsync.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/jobsync/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/jobsync/config.yaml"
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("jobsync.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("jobsync").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    serde_yaml::from_str(contents).map_err(|e| eyre!(e))
  }

  /// Build the configured session store.
  pub fn session_store(&self) -> Result<Arc<dyn KeyValueStore>> {
    Ok(match self.cache.backend {
      CacheBackend::Memory => Arc::new(MemoryStore::new()),
      CacheBackend::Sqlite => Arc::new(SqliteStore::open()?),
      CacheBackend::None => Arc::new(NoopStore),
    })
  }

  /// Get the API token from environment variables.
  ///
  /// Checks JOBSYNC_API_TOKEN first, then JOBBOARD_API_TOKEN as fallback.
  pub fn api_token() -> Result<String> {
    std::env::var("JOBSYNC_API_TOKEN")
      .or_else(|_| std::env::var("JOBBOARD_API_TOKEN"))
      .map_err(|_| {
        eyre!("API token not found. Set JOBSYNC_API_TOKEN or JOBBOARD_API_TOKEN environment variable.")
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_full_config() {
    let config =
      Config::parse("api:\n  url: https://api.example.test/\ncache:\n  backend: sqlite\n")
        .unwrap();

    assert_eq!(config.api.url, "https://api.example.test/");
    assert_eq!(config.cache.backend, CacheBackend::Sqlite);
  }

  #[test]
  fn test_cache_section_defaults_to_memory() {
    let config = Config::parse("api:\n  url: https://api.example.test/\n").unwrap();
    assert_eq!(config.cache.backend, CacheBackend::Memory);
  }

  #[test]
  fn test_missing_api_section_fails() {
    assert!(Config::parse("cache:\n  backend: memory\n").is_err());
  }
}
