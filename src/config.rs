use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences, stored as TOML in the platform config dir.
/// Updated through the `config` subcommand.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Config {
  /// External player command handed the resolved route string.
  pub player_command: Option<String>,
  /// JSON catalog file overriding the embedded seed data.
  pub catalog_path: Option<String>,
}

fn prefs_path() -> Option<PathBuf> {
  ProjectDirs::from("", "", "kidvid").map(|dirs| dirs.config_dir().join("prefs.toml"))
}

impl Config {
  pub fn load() -> Self {
    prefs_path().map(|path| Self::load_from(&path)).unwrap_or_default()
  }

  fn load_from(path: &Path) -> Self {
    if let Ok(content) = std::fs::read_to_string(path)
      && let Ok(config) = toml::from_str(&content)
    {
      return config;
    }
    Self::default()
  }

  /// Best-effort: losing a prefs write must never fail a command.
  pub fn save(&self) {
    if let Some(path) = prefs_path() {
      self.save_to(&path);
    }
  }

  fn save_to(&self, path: &Path) {
    if let Some(dir) = path.parent()
      && !dir.as_os_str().is_empty()
      && std::fs::create_dir_all(dir).is_err()
    {
      return;
    }
    if let Ok(content) = toml::to_string(self) {
      let _ = std::fs::write(path, content);
    }
  }
}
