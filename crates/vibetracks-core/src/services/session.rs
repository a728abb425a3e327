use std::time::Duration;

use tracing::info;

use crate::domain::{GenreStat, Insights, Song, SongId};
use crate::ports::{ArtService, Clock, InsightService, SuggestionService};
use crate::services::artwork::DEFAULT_ART_TIMEOUT;
use crate::services::busy::BusyFlag;
use crate::services::collection::CollectionStore;
use crate::services::derive::{SortKey, SortOrder, genre_aggregate, sorted_view};
use crate::services::form::{Draft, FormController, FormError, SubmitOutcome};
use crate::services::orchestrator::{AutoRefresh, InsightOrchestrator, RoundOutcome};

#[derive(Debug, Clone)]
pub struct SessionOptions {
  pub art_timeout: Duration,
  pub sort_key: SortKey,
  pub sort_order: SortOrder,
}

impl Default for SessionOptions {
  fn default() -> Self {
    Self { art_timeout: DEFAULT_ART_TIMEOUT, sort_key: SortKey::AddedAt, sort_order: SortOrder::Desc }
  }
}

/// Everything one user session holds: the collection, the view settings,
/// the insight panel and the add/edit form.
///
/// Owned by the presentation layer. Mutations that change the collection
/// size start an insight round before returning.
pub struct Session<I, S, A, C>
where
  I: InsightService,
  S: SuggestionService,
  A: ArtService,
  C: Clock,
{
  store: CollectionStore,
  form: FormController,
  orchestrator: InsightOrchestrator<I, S>,
  auto_refresh: AutoRefresh,
  art: A,
  clock: C,
  options: SessionOptions,
}

impl<I, S, A, C> Session<I, S, A, C>
where
  I: InsightService,
  S: SuggestionService,
  A: ArtService,
  C: Clock,
{
  pub fn new(store: CollectionStore, insights: I, suggestions: S, art: A, clock: C, options: SessionOptions) -> Self {
    Self {
      store,
      form: FormController::new(),
      orchestrator: InsightOrchestrator::new(insights, suggestions),
      auto_refresh: AutoRefresh::new(),
      art,
      clock,
      options,
    }
  }

  // -------- QUERY (read) --------

  pub fn store(&self) -> &CollectionStore {
    &self.store
  }

  pub fn songs_sorted(&self) -> Vec<Song> {
    sorted_view(self.store.songs(), self.options.sort_key, self.options.sort_order)
  }

  pub fn genre_stats(&self) -> Vec<GenreStat> {
    genre_aggregate(self.store.songs())
  }

  pub fn sort_key(&self) -> SortKey {
    self.options.sort_key
  }

  pub fn sort_order(&self) -> SortOrder {
    self.options.sort_order
  }

  pub fn insights(&self) -> Option<&Insights> {
    self.orchestrator.current()
  }

  pub fn insights_loading(&self) -> bool {
    self.orchestrator.is_loading()
  }

  pub fn form(&self) -> &FormController {
    &self.form
  }

  pub fn art_generating(&self) -> bool {
    self.form.is_generating_art()
  }

  pub fn art_flag(&self) -> BusyFlag {
    self.form.art_flag()
  }

  // -------- COMMAND (write) --------

  pub fn set_sort_key(&mut self, key: SortKey) {
    self.options.sort_key = key;
  }

  pub fn toggle_sort_order(&mut self) -> SortOrder {
    self.options.sort_order = self.options.sort_order.toggle();
    self.options.sort_order
  }

  /// Removes a song. Returns whether anything was removed.
  pub async fn delete(&mut self, id: &SongId) -> bool {
    let before = self.store.len();
    let removed = self.store.delete(id).len() < before;
    if removed {
      info!(song = %id, "Deleted song");
      self.refresh_if_needed().await;
    }
    removed
  }

  pub fn open_add(&mut self) -> Result<(), FormError> {
    self.form.open_add()
  }

  pub fn open_edit(&mut self, id: &SongId) -> Result<(), FormError> {
    self.form.open_edit(&self.store, id)
  }

  pub fn draft_mut(&mut self) -> Option<&mut Draft> {
    self.form.draft_mut()
  }

  pub fn cancel_form(&mut self) -> Result<(), FormError> {
    self.form.cancel()
  }

  /// Submits the open form, then refreshes insights if a song was added.
  pub async fn submit_form(&mut self) -> Result<SubmitOutcome, FormError> {
    let outcome = self.form.submit(&mut self.store, &self.art, &self.clock, self.options.art_timeout).await?;
    self.refresh_if_needed().await;
    Ok(outcome)
  }

  /// Runs an insight round if the collection size changed since the last check.
  pub async fn refresh_if_needed(&mut self) -> Option<RoundOutcome> {
    if !self.auto_refresh.needs_refresh(self.store.len()) {
      return None;
    }
    Some(self.orchestrator.refresh(self.store.songs()).await)
  }

  /// Manual insight round, regardless of size changes.
  pub async fn refresh_insights(&mut self) -> RoundOutcome {
    self.orchestrator.refresh(self.store.songs()).await
  }
}
