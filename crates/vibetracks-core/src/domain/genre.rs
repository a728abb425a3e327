use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Genres offered by the add/edit form.
///
/// This is only the suggestion list: [`Song::genre`](crate::domain::Song)
/// stays free text, so a collection may hold genres outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
  Pop,
  Rock,
  Metal,
  Electronic,
  HipHop,
}

/// Genre preselected in a fresh draft.
pub const DEFAULT_GENRE: Genre = Genre::Pop;

impl Genre {
  /// Every genre in the order the form lists them.
  pub const ALL: [Genre; 5] = [Genre::Pop, Genre::Rock, Genre::Metal, Genre::Electronic, Genre::HipHop];

  pub fn as_str(&self) -> &'static str {
    match self {
      Genre::Pop => "Pop",
      Genre::Rock => "Rock",
      Genre::Metal => "Metal",
      Genre::Electronic => "Electronic",
      Genre::HipHop => "Hip Hop",
    }
  }
}

impl fmt::Display for Genre {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error produced when a string does not name one of the offered [`Genre`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid genre: {input}")]
pub struct GenreParseError {
  pub input: String,
}

impl FromStr for Genre {
  type Err = GenreParseError;

  /// Case, spaces, dashes and underscores are ignored, so `"hip-hop"`,
  /// `"HipHop"` and `"Hip Hop"` all parse to [`Genre::HipHop`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace(['-', ' ', '_'], "");

    let genre = match normalized.as_str() {
      "pop" => Genre::Pop,
      "rock" => Genre::Rock,
      "metal" => Genre::Metal,
      "electronic" => Genre::Electronic,
      "hiphop" => Genre::HipHop,
      _ => return Err(GenreParseError { input: s.to_string() }),
    };

    Ok(genre)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_loose_spellings() {
    assert_eq!("hip-hop".parse::<Genre>(), Ok(Genre::HipHop));
    assert_eq!(" Hip Hop ".parse::<Genre>(), Ok(Genre::HipHop));
    assert_eq!("METAL".parse::<Genre>(), Ok(Genre::Metal));
  }

  #[test]
  fn rejects_unknown_genre() {
    let err = "polka".parse::<Genre>().unwrap_err();
    assert_eq!(err.input, "polka");
  }

  #[test]
  fn display_round_trips_through_parse() {
    for genre in Genre::ALL {
      assert_eq!(genre.to_string().parse::<Genre>(), Ok(genre));
    }
  }
}
