use crate::io::atomic_write_str;
use crate::paths::{ConfigError, VibePaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

// Writes go through toml_edit so comments and unrelated sections survive.
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Like [`load_section`](Self::load_section), but a missing file or
  /// section yields `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;
}

pub struct TomlConfigBackend {
  paths: VibePaths,
}

impl TomlConfigBackend {
  pub fn new(paths: VibePaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &VibePaths {
    &self.paths
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
  }
}

fn decode<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let table = self
      .read_table()?
      .ok_or_else(|| ConfigError::Other(format!("config file {:?} does not exist", path)))?;

    let value =
      table.get(section).ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      tracing::debug!(section, "No config file yet, using defaults");
      return Ok(T::default());
    };

    match table.get(section) {
      Some(value) => decode(section, value),
      None => Ok(T::default()),
    }
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // 1) Current file as an editable document, or an empty one.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Section body via serde, without a header ("foo = 1\nbar = 2\n").
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    // 3) Reparse it as a table item.
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 4) Replace only that section.
    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    tracing::debug!(section, path = %path.display(), "Saved config section");

    Ok(())
  }
}
