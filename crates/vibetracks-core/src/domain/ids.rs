use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a [`Song`](crate::domain::Song) inside the collection.
///
/// Ids are opaque strings. Fresh ones come from UUID v4, but any string
/// provided by the caller is accepted (the demo collection uses short ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
  /// Generates a new unique identifier.
  pub fn new() -> Self {
    SongId(Uuid::new_v4().simple().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SongId {
  fn from(s: &str) -> Self {
    SongId(s.to_string())
  }
}

impl From<String> for SongId {
  fn from(s: String) -> Self {
    SongId(s)
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generated_ids_are_unique() {
    let a = SongId::new();
    let b = SongId::new();
    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 32);
  }

  #[test]
  fn caller_ids_are_kept_verbatim() {
    let id = SongId::from("cob1");
    assert_eq!(id.to_string(), "cob1");
  }
}
