use std::fmt;

use serde::{Deserialize, Serialize};
use vibetracks_config::{ConfigBackend, ConfigError};

/// Environment variables checked, in order, for the API key.
pub const API_KEY_ENVS: [&str; 2] = ["VIBETRACKS_API_KEY", "GEMINI_API_KEY"];

const SECTION: &str = "ai";

/// `[ai]` section of `vibetracks.toml`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
  /// Root of the Generative Language API.
  pub base_url: String,
  /// Model answering the insight and suggestion prompts.
  pub text_model: String,
  /// Model generating cover art.
  pub image_model: String,
  pub request_timeout_secs: u64,
  /// Overridden by the environment; never written back when it came from there.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      base_url: "https://generativelanguage.googleapis.com".to_string(),
      text_model: "gemini-2.5-flash".to_string(),
      image_model: "gemini-2.5-flash-image".to_string(),
      request_timeout_secs: 30,
      api_key: None,
    }
  }
}

// Keeps the key out of logs.
impl fmt::Debug for AiConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AiConfig")
      .field("base_url", &self.base_url)
      .field("text_model", &self.text_model)
      .field("image_model", &self.image_model)
      .field("request_timeout_secs", &self.request_timeout_secs)
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl AiConfig {
  /// Loads `[ai]`, writes the effective file values back so the section
  /// exists for the user to edit, then applies the environment.
  pub fn load<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg: AiConfig = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;

    let env_key = API_KEY_ENVS.iter().find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
    Ok(cfg.with_api_key_override(env_key))
  }

  /// Replaces the key with `key` when it is present and not blank.
  pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
    if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
      self.api_key = Some(key.trim().to_string());
    }
    self
  }

  /// The configured key, if it is usable.
  pub fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
  }
}
