use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::domain::{DEFAULT_GENRE, DEFAULT_MOOD, DEFAULT_SPOTIFY_URL, Song, SongId, SongPatch};
use crate::errors::CoreError;
use crate::ports::{ArtService, Clock};
use crate::services::artwork::resolve_cover_art;
use crate::services::busy::BusyFlag;
use crate::services::collection::CollectionStore;

/// Uncommitted field values of the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
  pub title: String,
  pub artist: String,
  /// May be left empty; [`DEFAULT_SPOTIFY_URL`] is stored instead.
  pub spotify_url: String,
  pub genre: String,
}

impl Default for Draft {
  fn default() -> Self {
    Self { title: String::new(), artist: String::new(), spotify_url: String::new(), genre: DEFAULT_GENRE.to_string() }
  }
}

impl Draft {
  pub fn from_song(song: &Song) -> Self {
    Self {
      title: song.title.clone(),
      artist: song.artist.clone(),
      spotify_url: song.spotify_url.clone(),
      genre: song.genre.clone(),
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.title.trim().is_empty() {
      return Err(ValidationError::MissingTitle);
    }
    if self.artist.trim().is_empty() {
      return Err(ValidationError::MissingArtist);
    }
    Ok(())
  }

  fn spotify_url_or_default(&self) -> String {
    match self.spotify_url.trim() {
      "" => DEFAULT_SPOTIFY_URL.to_string(),
      url => url.to_string(),
    }
  }

  fn genre_or_default(&self) -> String {
    match self.genre.trim() {
      "" => DEFAULT_GENRE.to_string(),
      genre => genre.to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("title is required")]
  MissingTitle,
  #[error("artist is required")]
  MissingArtist,
}

/// State of the add/edit form. Editing always carries its target id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
  #[default]
  Closed,
  Adding {
    draft: Draft,
  },
  Editing {
    song_id: SongId,
    draft: Draft,
  },
}

#[derive(Debug, Error)]
pub enum FormError {
  #[error("invalid draft: {0}")]
  Validation(#[from] ValidationError),

  #[error("form is not open")]
  NotOpen,

  #[error("form is already open")]
  AlreadyOpen,

  #[error("cover art is still being generated")]
  ArtInFlight,

  #[error(transparent)]
  Core(#[from] CoreError),
}

/// What a successful submission committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Added(SongId),
  Updated(SongId),
}

impl SubmitOutcome {
  pub fn song_id(&self) -> &SongId {
    match self {
      SubmitOutcome::Added(id) | SubmitOutcome::Updated(id) => id,
    }
  }
}

/// Add/edit flow: owns the draft until it is committed to the store.
#[derive(Debug, Default)]
pub struct FormController {
  state: FormState,
  art_busy: BusyFlag,
}

impl FormController {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> &FormState {
    &self.state
  }

  pub fn is_open(&self) -> bool {
    !matches!(self.state, FormState::Closed)
  }

  /// Handle on the flag raised while cover art is being generated.
  pub fn art_flag(&self) -> BusyFlag {
    self.art_busy.clone()
  }

  pub fn is_generating_art(&self) -> bool {
    self.art_busy.is_set()
  }

  pub fn draft(&self) -> Option<&Draft> {
    match &self.state {
      FormState::Closed => None,
      FormState::Adding { draft } | FormState::Editing { draft, .. } => Some(draft),
    }
  }

  pub fn draft_mut(&mut self) -> Option<&mut Draft> {
    match &mut self.state {
      FormState::Closed => None,
      FormState::Adding { draft } | FormState::Editing { draft, .. } => Some(draft),
    }
  }

  /// Closed → adding, with a fresh draft.
  pub fn open_add(&mut self) -> Result<(), FormError> {
    self.ensure_closed()?;
    self.state = FormState::Adding { draft: Draft::default() };
    Ok(())
  }

  /// Closed → editing, with the draft loaded from the song.
  pub fn open_edit(&mut self, store: &CollectionStore, id: &SongId) -> Result<(), FormError> {
    self.ensure_closed()?;
    let song = store.get(id).ok_or_else(|| CoreError::NotFound(id.clone()))?;
    self.state = FormState::Editing { song_id: id.clone(), draft: Draft::from_song(song) };
    Ok(())
  }

  /// Discards the draft. Refused while cover art is in flight.
  pub fn cancel(&mut self) -> Result<(), FormError> {
    if self.art_busy.is_set() {
      return Err(FormError::ArtInFlight);
    }
    self.state = FormState::Closed;
    Ok(())
  }

  /// Validates the draft, generates its cover and commits it to `store`.
  ///
  /// Validation runs before any request; a rejected draft leaves the form
  /// open and the store untouched. Once committed, the form closes.
  pub async fn submit<A, C>(
    &mut self,
    store: &mut CollectionStore,
    art: &A,
    clock: &C,
    art_timeout: Duration,
  ) -> Result<SubmitOutcome, FormError>
  where
    A: ArtService + ?Sized,
    C: Clock + ?Sized,
  {
    let draft = self.draft().ok_or(FormError::NotOpen)?.clone();
    draft.validate()?;

    let Some(_guard) = self.art_busy.try_raise() else {
      return Err(FormError::ArtInFlight);
    };

    let title = draft.title.trim().to_string();
    let artist = draft.artist.trim().to_string();
    let genre = draft.genre_or_default();
    let image_url = resolve_cover_art(art, &title, &artist, &genre, art_timeout).await;

    let outcome = match std::mem::take(&mut self.state) {
      FormState::Closed => return Err(FormError::NotOpen),
      FormState::Adding { .. } => {
        let song = Song {
          id: SongId::new(),
          title,
          artist,
          spotify_url: draft.spotify_url_or_default(),
          image_url,
          genre,
          mood: DEFAULT_MOOD.to_string(),
          added_at: clock.now_millis(),
        };
        let id = song.id.clone();
        store.insert(song)?;
        SubmitOutcome::Added(id)
      }
      FormState::Editing { song_id, .. } => {
        let patch = SongPatch {
          title: Some(title),
          artist: Some(artist),
          spotify_url: Some(draft.spotify_url_or_default()),
          image_url: Some(image_url),
          genre: Some(genre),
        };
        store.update(&song_id, patch)?;
        SubmitOutcome::Updated(song_id)
      }
    };

    info!(song = %outcome.song_id(), "Committed form");
    Ok(outcome)
  }

  fn ensure_closed(&self) -> Result<(), FormError> {
    match self.state {
      FormState::Closed => Ok(()),
      _ => Err(FormError::AlreadyOpen),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{PLACEHOLDER_IMAGE_URL, song::demo_collection};
  use crate::ports::AiError;
  use async_trait::async_trait;
  use std::sync::Mutex;

  struct FixedClock(i64);

  impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
      self.0
    }
  }

  /// Art stub that remembers its calls and whether the art flag was up.
  #[derive(Default)]
  struct RecordingArt {
    image: Option<String>,
    flag: Option<BusyFlag>,
    calls: Mutex<Vec<(String, String, String, bool)>>,
  }

  #[async_trait]
  impl ArtService for RecordingArt {
    async fn generate_art(&self, title: &str, artist: &str, genre: &str) -> Result<Option<String>, AiError> {
      let busy = self.flag.as_ref().is_some_and(|f| f.is_set());
      self.calls.lock().unwrap().push((title.into(), artist.into(), genre.into(), busy));
      Ok(self.image.clone())
    }
  }

  const TIMEOUT: Duration = Duration::from_secs(1);

  fn fill(form: &mut FormController, title: &str, artist: &str, url: &str) {
    let draft = form.draft_mut().unwrap();
    draft.title = title.into();
    draft.artist = artist.into();
    draft.spotify_url = url.into();
  }

  #[tokio::test]
  async fn add_prepends_a_new_song_and_closes() {
    let mut store = CollectionStore::with_songs(demo_collection(1_000));
    let mut form = FormController::new();
    let art = RecordingArt { image: Some("https://img/1.png".into()), ..Default::default() };

    form.open_add().unwrap();
    assert_eq!(form.draft().unwrap().genre, "Pop");
    fill(&mut form, " Hate Me! ", "Children of Bodom", "");

    let outcome = form.submit(&mut store, &art, &FixedClock(5_000), TIMEOUT).await.unwrap();

    let SubmitOutcome::Added(id) = outcome else { panic!("expected an add") };
    let song = &store.songs()[0];
    assert_eq!(song.id, id);
    assert_eq!(song.title, "Hate Me!");
    assert_eq!(song.spotify_url, DEFAULT_SPOTIFY_URL);
    assert_eq!(song.image_url, "https://img/1.png");
    assert_eq!(song.mood, DEFAULT_MOOD);
    assert_eq!(song.added_at, 5_000);
    assert_eq!(store.len(), 4);
    assert_eq!(form.state(), &FormState::Closed);
  }

  #[tokio::test]
  async fn empty_artist_is_rejected_without_mutation_or_request() {
    let mut store = CollectionStore::with_songs(demo_collection(0));
    let before = store.songs().to_vec();
    let mut form = FormController::new();
    let art = RecordingArt::default();

    form.open_add().unwrap();
    fill(&mut form, "Song", "   ", "");

    let err = form.submit(&mut store, &art, &FixedClock(0), TIMEOUT).await.unwrap_err();

    assert!(matches!(err, FormError::Validation(ValidationError::MissingArtist)));
    assert_eq!(store.songs(), before.as_slice());
    assert!(art.calls.lock().unwrap().is_empty());
    assert!(form.is_open());
  }

  #[tokio::test]
  async fn empty_title_is_rejected() {
    let mut store = CollectionStore::new();
    let mut form = FormController::new();
    form.open_add().unwrap();
    fill(&mut form, "", "Madonna", "");

    let err = form.submit(&mut store, &RecordingArt::default(), &FixedClock(0), TIMEOUT).await.unwrap_err();
    assert!(matches!(err, FormError::Validation(ValidationError::MissingTitle)));
    assert!(store.is_empty());
  }

  #[tokio::test]
  async fn empty_art_saves_placeholder() {
    let mut store = CollectionStore::new();
    let mut form = FormController::new();
    form.open_add().unwrap();
    fill(&mut form, "Frozen", "Madonna", "https://open.spotify.com/track/x");

    form.submit(&mut store, &RecordingArt::default(), &FixedClock(0), TIMEOUT).await.unwrap();

    assert_eq!(store.songs()[0].image_url, PLACEHOLDER_IMAGE_URL);
    assert_eq!(store.songs()[0].spotify_url, "https://open.spotify.com/track/x");
  }

  #[tokio::test]
  async fn edit_merges_draft_and_keeps_identity() {
    let mut store = CollectionStore::with_songs(demo_collection(10_000));
    let target = SongId::from("1");
    let mut form = FormController::new();
    let art = RecordingArt { image: Some("data:image/png;base64,QQ==".into()), ..Default::default() };

    form.open_edit(&store, &target).unwrap();
    assert_eq!(form.draft().unwrap().title, "Frozen");
    let draft = form.draft_mut().unwrap();
    draft.genre = "Electronic".into();
    draft.title = "Frozen (Remix)".into();

    let outcome = form.submit(&mut store, &art, &FixedClock(99_999), TIMEOUT).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated(target.clone()));

    let song = store.get(&target).unwrap();
    assert_eq!(song.title, "Frozen (Remix)");
    assert_eq!(song.genre, "Electronic");
    assert_eq!(song.mood, "Mystic");
    assert_eq!(song.added_at, 9_000);
    assert_eq!(song.image_url, "data:image/png;base64,QQ==");
    assert_eq!(store.len(), 3);
    assert_eq!(art.calls.lock().unwrap()[0].2, "Electronic");
  }

  #[tokio::test]
  async fn edit_of_vanished_song_reports_not_found_and_closes() {
    let mut store = CollectionStore::with_songs(demo_collection(0));
    let target = SongId::from("cob2");
    let mut form = FormController::new();
    form.open_edit(&store, &target).unwrap();
    store.delete(&target);

    let err = form.submit(&mut store, &RecordingArt::default(), &FixedClock(0), TIMEOUT).await.unwrap_err();
    assert!(matches!(err, FormError::Core(CoreError::NotFound(_))));
    assert!(!form.is_open());
  }

  #[tokio::test]
  async fn art_flag_is_raised_during_generation_only() {
    let mut store = CollectionStore::new();
    let mut form = FormController::new();
    let art = RecordingArt { flag: Some(form.art_flag()), ..Default::default() };

    form.open_add().unwrap();
    fill(&mut form, "A", "B", "");
    assert!(!form.is_generating_art());

    form.submit(&mut store, &art, &FixedClock(0), TIMEOUT).await.unwrap();

    assert!(art.calls.lock().unwrap()[0].3, "flag must be up while art is generated");
    assert!(!form.is_generating_art());
  }

  #[test]
  fn cancel_is_refused_while_art_is_in_flight() {
    let mut form = FormController::new();
    form.open_add().unwrap();

    let flag = form.art_flag();
    let guard = flag.try_raise().unwrap();
    assert!(matches!(form.cancel(), Err(FormError::ArtInFlight)));
    assert!(form.is_open());

    drop(guard);
    form.cancel().unwrap();
    assert_eq!(form.state(), &FormState::Closed);
  }

  #[test]
  fn transitions_are_guarded() {
    let store = CollectionStore::with_songs(demo_collection(0));
    let mut form = FormController::new();

    assert!(matches!(form.open_edit(&store, &SongId::from("missing")), Err(FormError::Core(_))));
    assert!(!form.is_open());

    form.open_edit(&store, &SongId::from("cob1")).unwrap();
    assert!(matches!(form.open_add(), Err(FormError::AlreadyOpen)));
    assert!(matches!(form.state(), FormState::Editing { song_id, .. } if song_id.as_str() == "cob1"));

    form.cancel().unwrap();
    form.open_add().unwrap();
    assert_eq!(form.draft(), Some(&Draft::default()));
  }

  #[tokio::test]
  async fn submit_while_closed_is_rejected() {
    let mut form = FormController::new();
    let err =
      form.submit(&mut CollectionStore::new(), &RecordingArt::default(), &FixedClock(0), TIMEOUT).await.unwrap_err();
    assert!(matches!(err, FormError::NotOpen));
  }
}
