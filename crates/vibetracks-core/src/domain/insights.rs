use serde::{Deserialize, Serialize};

/// Number of songs sharing one genre. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreStat {
  pub name: String,
  pub value: usize,
}

/// A song recommended by the suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
  pub title: String,
  pub artist: String,
  pub reason: String,
}

/// Insight text and suggestion shown together.
///
/// Both halves come from the same orchestration round and are only ever
/// replaced as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
  pub text: String,
  pub suggestion: Suggestion,
}
