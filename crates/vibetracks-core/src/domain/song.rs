use crate::domain::ids::SongId;
use serde::{Deserialize, Serialize};

/// Cover shown when art generation fails, times out or returns nothing:
/// a grey music-note icon as an inline SVG.
pub const PLACEHOLDER_IMAGE_URL: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI0MDAiIGhlaWdodD0iNDAwIiB2aWV3Qm94PSIwIDAgMjQgMjQiIGZpbGw9Im5vbmUiIHN0cm9rZT0iIzRjNGM0YyIgc3Ryb2tlLXdpZHRoPSIyIiBzdHJva2UtbGluZWNhcD0icm91bmQiIHN0cm9rZS1saW5lam9pbj0icm91bmQiIGNsYXNzPSJsdWNpZGUgbHVjaWRlLW11c2ljIj48cGF0aCBkPSJNOSAxOFY1bDEyLTJ2MTMiLz48Y2lyY2xlIGN4PSI2IiBjeT0iMTgiIHI9IjMiLz48Y2lyY2xlIGN4PSIxOCIgY3k9IjE2IiByPSIzIi8+PC9zdmc+";

/// Link stored when the user leaves the Spotify field empty.
pub const DEFAULT_SPOTIFY_URL: &str = "https://open.spotify.com";

/// Mood given to newly added songs.
pub const DEFAULT_MOOD: &str = "Winter";

/// A song in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
  /// Unique within the collection; never changes.
  pub id: SongId,
  pub title: String,
  pub artist: String,
  pub spotify_url: String,
  /// Regular URL or `data:` URI.
  pub image_url: String,
  /// Free text. The form offers [`Genre`](crate::domain::Genre) values.
  pub genre: String,
  pub mood: String,
  /// Epoch millis, set once at creation.
  pub added_at: i64,
}

/// Editable fields of a [`Song`]. `None` leaves the field as it is.
///
/// `id` and `added_at` are deliberately absent: they cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
  pub title: Option<String>,
  pub artist: Option<String>,
  pub spotify_url: Option<String>,
  pub image_url: Option<String>,
  pub genre: Option<String>,
}

impl SongPatch {
  pub fn apply_to(self, song: &mut Song) {
    if let Some(title) = self.title {
      song.title = title;
    }
    if let Some(artist) = self.artist {
      song.artist = artist;
    }
    if let Some(url) = self.spotify_url {
      song.spotify_url = url;
    }
    if let Some(image) = self.image_url {
      song.image_url = image;
    }
    if let Some(genre) = self.genre {
      song.genre = genre;
    }
  }
}

/// Collection a fresh session starts with.
///
/// Songs are ordered newest first, half a second apart, ending at `now_millis`.
pub fn demo_collection(now_millis: i64) -> Vec<Song> {
  let demo = |id: &str, title: &str, artist: &str, track: &str, seed: &str, genre: &str, mood: &str, age: i64| Song {
    id: SongId::from(id),
    title: title.to_string(),
    artist: artist.to_string(),
    spotify_url: format!("https://open.spotify.com/track/{track}"),
    image_url: format!("https://picsum.photos/seed/{seed}/400/400"),
    genre: genre.to_string(),
    mood: mood.to_string(),
    added_at: now_millis - age,
  };

  vec![
    demo("cob1", "Lake Bodom", "Children of Bodom", "1L2N0YjO5W8kF6rG5v8S0T", "lakebodom", "Metal", "Aggressive", 0),
    demo(
      "cob2",
      "Are You Dead Yet?",
      "Children of Bodom",
      "4C6h2vC57mS9u0E9O9u9A9",
      "areyoudeadyet",
      "Metal",
      "Heavy",
      500,
    ),
    demo("1", "Frozen", "Madonna", "4Y9f6lY7XjK8q3MvI9f6lY", "frozen", "Pop", "Mystic", 1_000),
  ]
}
