use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that relocates every VibeTracks directory under one base.
pub const BASE_DIR_ENV: &str = "VIBETRACKS_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Where VibeTracks keeps its configuration. The collection itself is
/// never written to disk.
#[derive(Debug, Clone)]
pub struct VibePaths {
  pub config_dir: PathBuf,
}

impl VibePaths {
  /// `$VIBETRACKS_BASE_DIR/config` if set, else the platform config dir.
  pub fn new() -> Result<Self, ConfigError> {
    let config_dir = match std::env::var_os(BASE_DIR_ENV) {
      Some(base) => PathBuf::from(base).join("config"),
      None => {
        let dirs = ProjectDirs::from("com", "vibetracks", "vibetracks").ok_or(ConfigError::Directories)?;
        dirs.config_dir().to_path_buf()
      }
    };
    Self::at(config_dir)
  }

  /// Paths rooted at `base`, without consulting the environment.
  pub fn rooted_at(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    Self::at(base.into().join("config"))
  }

  fn at(config_dir: PathBuf) -> Result<Self, ConfigError> {
    std::fs::create_dir_all(&config_dir)?;
    Ok(Self { config_dir })
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("vibetracks.toml")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  fn test_base_dir_override() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = VibePaths::new().unwrap();

    assert_eq!(paths.config_dir, tmp.path().join("config"));
    assert!(paths.config_dir.exists());
    assert_eq!(paths.config_file(), tmp.path().join("config").join("vibetracks.toml"));
    assert!(!tmp.path().join("data").exists());
    assert!(!tmp.path().join("cache").exists());
  }

  #[test]
  fn rooted_at_creates_only_the_config_dir() {
    let tmp = tempdir().unwrap();
    let paths = VibePaths::rooted_at(tmp.path().join("nested")).unwrap();
    assert_eq!(paths.config_dir, tmp.path().join("nested").join("config"));
    assert!(paths.config_dir.exists());
    assert_eq!(std::fs::read_dir(tmp.path().join("nested")).unwrap().count(), 1);
  }
}
