use crate::domain::{Song, SongId, SongPatch};
use crate::errors::CoreError;

/// In-memory, ordered collection of songs. Sole owner of [`Song`] records.
///
/// Every mutation returns the full collection as it stands afterwards, so
/// callers can recompute derived views straight from the result.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
  songs: Vec<Song>,
}

impl CollectionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a store from an existing ordered list.
  ///
  /// Later duplicates of an id are dropped so the uniqueness invariant
  /// holds from the start.
  pub fn with_songs(songs: Vec<Song>) -> Self {
    let mut store = Self::new();
    for song in songs {
      if !store.contains(&song.id) {
        store.songs.push(song);
      }
    }
    store
  }

  // -------- COMMAND (write) --------

  /// Prepends a new song.
  pub fn insert(&mut self, song: Song) -> Result<&[Song], CoreError> {
    if self.contains(&song.id) {
      return Err(CoreError::DuplicateId(song.id));
    }
    self.songs.insert(0, song);
    Ok(&self.songs)
  }

  /// Merges `patch` into the song with `id`.
  pub fn update(&mut self, id: &SongId, patch: SongPatch) -> Result<&[Song], CoreError> {
    let song = self.songs.iter_mut().find(|s| &s.id == id).ok_or_else(|| CoreError::NotFound(id.clone()))?;
    patch.apply_to(song);
    Ok(&self.songs)
  }

  /// Removes the song with `id`. Unknown ids leave the collection untouched.
  pub fn delete(&mut self, id: &SongId) -> &[Song] {
    self.songs.retain(|s| &s.id != id);
    &self.songs
  }

  // -------- QUERY (read) --------

  pub fn songs(&self) -> &[Song] {
    &self.songs
  }

  pub fn get(&self, id: &SongId) -> Option<&Song> {
    self.songs.iter().find(|s| &s.id == id)
  }

  pub fn contains(&self, id: &SongId) -> bool {
    self.get(id).is_some()
  }

  pub fn len(&self) -> usize {
    self.songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.songs.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{DEFAULT_MOOD, DEFAULT_SPOTIFY_URL, PLACEHOLDER_IMAGE_URL};

  fn song(id: &str, title: &str) -> Song {
    Song {
      id: SongId::from(id),
      title: title.into(),
      artist: "Artist".into(),
      spotify_url: DEFAULT_SPOTIFY_URL.into(),
      image_url: PLACEHOLDER_IMAGE_URL.into(),
      genre: "Pop".into(),
      mood: DEFAULT_MOOD.into(),
      added_at: 1,
    }
  }

  fn ids(songs: &[Song]) -> Vec<&str> {
    songs.iter().map(|s| s.id.as_str()).collect()
  }

  #[test]
  fn insert_prepends() {
    let mut store = CollectionStore::new();
    store.insert(song("a", "First")).unwrap();
    let songs = store.insert(song("b", "Second")).unwrap();
    assert_eq!(ids(songs), ["b", "a"]);
  }

  #[test]
  fn insert_rejects_duplicate_id() {
    let mut store = CollectionStore::with_songs(vec![song("a", "First")]);
    let err = store.insert(song("a", "Again")).unwrap_err();
    assert_eq!(err, CoreError::DuplicateId(SongId::from("a")));
    assert_eq!(store.len(), 1);
    assert_eq!(store.songs()[0].title, "First");
  }

  #[test]
  fn with_songs_drops_repeated_ids() {
    let store = CollectionStore::with_songs(vec![song("a", "1"), song("b", "2"), song("a", "3")]);
    assert_eq!(ids(store.songs()), ["a", "b"]);
    assert_eq!(store.get(&SongId::from("a")).unwrap().title, "1");
  }

  #[test]
  fn update_merges_and_keeps_position() {
    let mut store = CollectionStore::with_songs(vec![song("a", "A"), song("b", "B")]);
    let patch = SongPatch { title: Some("B2".into()), ..Default::default() };
    let songs = store.update(&SongId::from("b"), patch).unwrap();
    assert_eq!(ids(songs), ["a", "b"]);
    assert_eq!(songs[1].title, "B2");
    assert_eq!(songs[1].added_at, 1);
  }

  #[test]
  fn update_unknown_id_is_not_found() {
    let mut store = CollectionStore::with_songs(vec![song("a", "A")]);
    let before = store.songs().to_vec();
    let err = store.update(&SongId::from("zz"), SongPatch::default()).unwrap_err();
    assert_eq!(err, CoreError::NotFound(SongId::from("zz")));
    assert_eq!(store.songs(), before.as_slice());
  }

  #[test]
  fn deleted_id_never_comes_back() {
    let mut store = CollectionStore::with_songs(vec![song("a", "A"), song("b", "B"), song("c", "C")]);
    let songs = store.delete(&SongId::from("b"));
    assert_eq!(ids(songs), ["a", "c"]);
    assert!(store.get(&SongId::from("b")).is_none());
    assert!(!store.contains(&SongId::from("b")));
  }

  #[test]
  fn deleting_unknown_id_is_a_no_op() {
    let mut store = CollectionStore::with_songs(vec![song("a", "A"), song("b", "B")]);
    let before = store.songs().to_vec();
    let after = store.delete(&SongId::from("nope")).to_vec();
    assert_eq!(before, after);
  }
}
