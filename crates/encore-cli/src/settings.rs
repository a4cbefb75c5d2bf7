//! Layered configuration: defaults, then an optional TOML file, then
//! `ENCORE_*` environment variables. Command-line flags are applied on top by
//! the caller.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_STORE_PATH: &str = "~/.local/share/encore/concerts.db";
const DEFAULT_LINES_PER_PAGE: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path: PathBuf,
  pub export:     ExportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
  /// Page height for the table export.
  pub lines_per_page: usize,
}

impl Settings {
  /// Load settings, layering `path` (if it exists) and the environment over
  /// the defaults.
  ///
  /// `ENCORE_STORE_PATH` and `ENCORE_EXPORT__LINES_PER_PAGE` map onto the
  /// fields above.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let mut settings: Settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .set_default("export.lines_per_page", DEFAULT_LINES_PER_PAGE)?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ENCORE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
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
