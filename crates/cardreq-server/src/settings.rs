//! Runtime server configuration.
//!
//! Layered lowest to highest: built-in defaults, the TOML file, then
//! `CARDREQ_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Prefix for environment overrides, e.g. `CARDREQ_REQUESTS_FOLDER`.
pub const ENV_PREFIX: &str = "CARDREQ";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// SQLite file holding the person table.
  pub database_path:   PathBuf,
  /// Directory holding one file per credit-card request.
  pub requests_folder: PathBuf,
}

impl ServerConfig {
  /// Read `path` (if it exists) and the environment on top of the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("database_path", "cardreq.db")?
      .set_default("requests_folder", "requests")?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()?;

    let mut cfg: Self = settings.try_deserialize()?;
    cfg.database_path = expand_tilde(&cfg.database_path);
    cfg.requests_folder = expand_tilde(&cfg.requests_folder);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
