use serde::{Deserialize, Serialize};
use std::time::Duration;
use vibetracks_config::{ConfigBackend, ConfigError};
use vibetracks_core::services::{DEFAULT_ART_TIMEOUT, SessionOptions};

const SECTION: &str = "session";

/// `[session]` section of `vibetracks.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
  /// Start with the demo collection instead of an empty one.
  pub seed_demo_songs: bool,
  /// Upper bound on a cover-art request before the placeholder is used.
  pub art_timeout_secs: u64,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self { seed_demo_songs: true, art_timeout_secs: DEFAULT_ART_TIMEOUT.as_secs() }
  }
}

impl SessionConfig {
  pub fn load<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }

  pub fn session_options(&self) -> SessionOptions {
    SessionOptions { art_timeout: Duration::from_secs(self.art_timeout_secs.max(1)), ..SessionOptions::default() }
  }
}
