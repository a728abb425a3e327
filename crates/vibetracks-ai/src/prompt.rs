use serde_json::{Value, json};
use vibetracks_core::domain::Song;

fn song_lines(songs: &[Song]) -> String {
  songs
    .iter()
    .map(|s| format!("- \"{}\" by {} (genre: {}, mood: {})", s.title, s.artist, s.genre, s.mood))
    .collect::<Vec<_>>()
    .join("\n")
}

pub(crate) fn insights(songs: &[Song]) -> String {
  format!(
    "Here is my music collection:\n{}\n\nIn at most two short sentences, describe the overall mood and genre mix \
     of this collection. Plain text only, no markdown.",
    song_lines(songs)
  )
}

pub(crate) fn suggestion(songs: &[Song]) -> String {
  format!(
    "Here is my music collection:\n{}\n\nSuggest exactly one song that is NOT in this list and fits its vibe. \
     Give its title, its artist and a one-sentence reason.",
    song_lines(songs)
  )
}

pub(crate) fn suggestion_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "title": { "type": "STRING" },
      "artist": { "type": "STRING" },
      "reason": { "type": "STRING" }
    },
    "required": ["title", "artist", "reason"]
  })
}

pub(crate) fn cover_art(title: &str, artist: &str, genre: &str) -> String {
  format!(
    "Square album cover art for the song \"{title}\" by {artist}. Genre: {genre}. \
     Wintry, atmospheric, cinematic lighting. No text, letters or logos."
  )
}
