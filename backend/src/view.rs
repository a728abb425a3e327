//! Plain-text rendering of the session state. Pure functions, no I/O.

use std::fmt::Write;

use chrono::DateTime;
use vibetracks_core::domain::{Genre, GenreStat, Insights, PLACEHOLDER_IMAGE_URL, Song};
use vibetracks_core::services::{Draft, SortKey, SortOrder};

const BAR_WIDTH: usize = 30;

pub const HELP: &str = "\
Commands:
  list                      show the collection
  sort <title|artist|added> change the sort key
  order                     toggle ascending/descending
  genres                    genre distribution chart
  add                       add a song
  edit <id|#>               edit a song (id or list position)
  delete <id|#>             delete a song
  insights                  show the AI insight panel
  refresh                   request new insights now
  help                      this text
  quit                      leave";

/// `YYYY-MM-DD HH:MM UTC`, or the raw millis if out of range.
pub fn format_added(millis: i64) -> String {
  match DateTime::from_timestamp_millis(millis) {
    Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
    None => format!("{millis} ms"),
  }
}

/// Short description of a cover image URL.
pub fn describe_cover(image_url: &str) -> String {
  if image_url == PLACEHOLDER_IMAGE_URL {
    return "placeholder".to_string();
  }
  match image_url.strip_prefix("data:") {
    Some(rest) => {
      let mime = rest.split([';', ',']).next().unwrap_or_default();
      format!("generated image ({mime})")
    }
    None => image_url.to_string(),
  }
}

pub fn render_song_list(songs: &[Song], key: SortKey, order: SortOrder) -> String {
  if songs.is_empty() {
    return "No songs yet. Use `add` to create one.\n".to_string();
  }

  let mut out = String::new();
  let noun = if songs.len() == 1 { "song" } else { "songs" };
  let _ = writeln!(out, "{} {noun}, sorted by {key} {order}", songs.len());
  for (i, song) in songs.iter().enumerate() {
    let _ = writeln!(out, "{:>3}. {} - {}  [{} / {}]", i + 1, song.title, song.artist, song.genre, song.mood);
    let _ = writeln!(out, "     added {}  id {}", format_added(song.added_at), song.id);
    let _ = writeln!(out, "     spotify {}", song.spotify_url);
    let _ = writeln!(out, "     cover {}", describe_cover(&song.image_url));
  }
  out
}

/// Horizontal bar chart, bars scaled to the largest genre.
pub fn render_genre_chart(stats: &[GenreStat]) -> String {
  let Some(max) = stats.iter().map(|s| s.value).max() else {
    return "No genres to chart.\n".to_string();
  };
  let label_width = stats.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);

  let mut out = String::new();
  for stat in stats {
    let len = (stat.value * BAR_WIDTH).div_ceil(max.max(1));
    let _ = writeln!(out, "{:<label_width$} | {} {}", stat.name, "#".repeat(len), stat.value);
  }
  out
}

pub fn render_insights(insights: Option<&Insights>, loading: bool, collection_empty: bool) -> String {
  let mut out = String::new();
  if loading {
    out.push_str("Analyzing your vibe...\n");
  }
  match insights {
    Some(insights) => {
      let _ = writeln!(out, "Insight: {}", insights.text);
      let s = &insights.suggestion;
      let _ = writeln!(out, "Try next: {} - {}", s.title, s.artist);
      let _ = writeln!(out, "  {}", s.reason);
    }
    None if collection_empty => out.push_str("Add some songs to get insights.\n"),
    None if !loading => out.push_str("No insights yet. Try `refresh`.\n"),
    None => {}
  }
  out
}

pub fn render_genre_choices() -> String {
  let names: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();
  format!("Genres: {}", names.join(", "))
}

pub fn render_draft(draft: &Draft) -> String {
  let spotify = if draft.spotify_url.trim().is_empty() { "(default)" } else { draft.spotify_url.as_str() };
  format!("{} - {}  [{}]  spotify {}", draft.title, draft.artist, draft.genre, spotify)
}

#[cfg(test)]
mod tests {
  use super::*;
  use vibetracks_core::domain::song::demo_collection;
  use vibetracks_core::domain::Suggestion;

  #[test]
  fn formats_added_in_utc() {
    assert_eq!(format_added(0), "1970-01-01 00:00 UTC");
    assert_eq!(format_added(1_700_000_000_000), "2023-11-14 22:13 UTC");
  }

  #[test]
  fn describes_covers() {
    assert_eq!(describe_cover(PLACEHOLDER_IMAGE_URL), "placeholder");
    assert_eq!(describe_cover("data:image/png;base64,AAAA"), "generated image (image/png)");
    assert_eq!(describe_cover("https://picsum.photos/seed/x/400/400"), "https://picsum.photos/seed/x/400/400");
  }

  #[test]
  fn song_list_numbers_rows() {
    let songs = demo_collection(0);
    let text = render_song_list(&songs, SortKey::AddedAt, SortOrder::Desc);
    assert!(text.starts_with("3 songs, sorted by added desc\n"));
    assert!(text.contains("  1. Lake Bodom - Children of Bodom"));
    assert!(text.contains("id cob1"));
    assert_eq!(render_song_list(&[], SortKey::Title, SortOrder::Asc), "No songs yet. Use `add` to create one.\n");
  }

  #[test]
  fn chart_scales_to_largest_bar() {
    let stats = vec![GenreStat { name: "Pop".into(), value: 2 }, GenreStat { name: "Metal".into(), value: 1 }];
    let text = render_genre_chart(&stats);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("Pop   | {} 2", "#".repeat(30)));
    assert_eq!(lines[1], format!("Metal | {} 1", "#".repeat(15)));
    assert_eq!(render_genre_chart(&[]), "No genres to chart.\n");
  }

  #[test]
  fn insight_panel_states() {
    let insights = Insights {
      text: "Cold and loud.".into(),
      suggestion: Suggestion { title: "Nemo".into(), artist: "Nightwish".into(), reason: "Epic".into() },
    };
    let text = render_insights(Some(&insights), true, false);
    assert!(text.starts_with("Analyzing your vibe...\n"));
    assert!(text.contains("Try next: Nemo - Nightwish"));

    assert_eq!(render_insights(None, false, true), "Add some songs to get insights.\n");
    assert_eq!(render_insights(None, false, false), "No insights yet. Try `refresh`.\n");
    assert_eq!(render_insights(None, true, false), "Analyzing your vibe...\n");
  }

  #[test]
  fn lists_genre_choices() {
    assert_eq!(render_genre_choices(), "Genres: Pop, Rock, Metal, Electronic, Hip Hop");
  }
}
