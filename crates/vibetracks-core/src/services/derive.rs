//! Pure projections of the collection: the sorted view and the genre
//! histogram. Nothing here mutates its input.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::{fmt, str::FromStr};

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{GenreStat, Song};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
  Title,
  Artist,
  AddedAt,
}

impl SortKey {
  fn text<'a>(&self, song: &'a Song) -> &'a str {
    match self {
      SortKey::Title => &song.title,
      SortKey::Artist => &song.artist,
      SortKey::AddedAt => "",
    }
  }
}

impl fmt::Display for SortKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      SortKey::Title => "title",
      SortKey::Artist => "artist",
      SortKey::AddedAt => "added",
    };
    f.write_str(text)
  }
}

/// Input that names neither a sort key nor a sort order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortParseError {
  #[error("unknown sort key: {0}")]
  Key(String),
  #[error("unknown sort order: {0}")]
  Order(String),
}

impl FromStr for SortKey {
  type Err = SortParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
      "title" => Ok(SortKey::Title),
      "artist" => Ok(SortKey::Artist),
      "added" | "addedat" | "date" => Ok(SortKey::AddedAt),
      _ => Err(SortParseError::Key(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
  Asc,
  Desc,
}

impl SortOrder {
  pub fn toggle(self) -> Self {
    match self {
      SortOrder::Asc => SortOrder::Desc,
      SortOrder::Desc => SortOrder::Asc,
    }
  }

  // Reverses the comparison rather than the output, so ties keep
  // collection order in both directions.
  fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      SortOrder::Asc => ordering,
      SortOrder::Desc => ordering.reverse(),
    }
  }
}

impl fmt::Display for SortOrder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SortOrder::Asc => "asc",
      SortOrder::Desc => "desc",
    })
  }
}

impl FromStr for SortOrder {
  type Err = SortParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "asc" | "ascending" => Ok(SortOrder::Asc),
      "desc" | "descending" => Ok(SortOrder::Desc),
      _ => Err(SortParseError::Order(s.to_string())),
    }
  }
}

/// Locale-aware string comparison.
///
/// Uses the ICU root collation. If the collator cannot be built, falls back
/// to a case-insensitive comparison with a byte-wise tie-break.
enum TextCollator {
  Icu(Collator),
  Plain,
}

impl TextCollator {
  fn new() -> Self {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
      Ok(collator) => TextCollator::Icu(collator),
      Err(e) => {
        tracing::warn!(error = ?e, "ICU collator unavailable, sorting case-insensitively");
        TextCollator::Plain
      }
    }
  }

  fn compare(&self, a: &str, b: &str) -> Ordering {
    match self {
      TextCollator::Icu(collator) => collator.compare(a, b),
      TextCollator::Plain => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    }
  }
}

/// Returns a sorted copy of `songs`.
///
/// The sort is stable: songs that compare equal keep their collection order.
pub fn sorted_view(songs: &[Song], key: SortKey, order: SortOrder) -> Vec<Song> {
  let mut view = songs.to_vec();

  match key {
    SortKey::AddedAt => view.sort_by(|a, b| order.apply(a.added_at.cmp(&b.added_at))),
    SortKey::Title | SortKey::Artist => {
      let collator = TextCollator::new();
      view.sort_by(|a, b| order.apply(collator.compare(key.text(a), key.text(b))));
    }
  }

  view
}

/// Counts songs per genre, in the order each genre first appears.
pub fn genre_aggregate(songs: &[Song]) -> Vec<GenreStat> {
  let mut index: HashMap<&str, usize> = HashMap::new();
  let mut stats: Vec<GenreStat> = Vec::new();

  for song in songs {
    match index.get(song.genre.as_str()) {
      Some(&i) => stats[i].value += 1,
      None => {
        index.insert(&song.genre, stats.len());
        stats.push(GenreStat { name: song.genre.clone(), value: 1 });
      }
    }
  }

  stats
}
