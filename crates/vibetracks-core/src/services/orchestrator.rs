use std::future::Future;

use futures::future;
use tracing::{debug, info, warn};

use crate::domain::{Insights, Song, Suggestion};
use crate::ports::{AiError, InsightService, SuggestionService};
use crate::services::busy::BusyFlag;

/// Drives both futures to completion and combines their results.
///
/// Neither future is dropped early: a failure in one still waits for the
/// other to settle. The combined value is returned only if both succeeded;
/// otherwise every error is returned.
pub async fn join_settled<A, B, E, FA, FB>(a: FA, b: FB) -> Result<(A, B), Vec<E>>
where
  FA: Future<Output = Result<A, E>>,
  FB: Future<Output = Result<B, E>>,
{
  match future::join(a, b).await {
    (Ok(a), Ok(b)) => Ok((a, b)),
    (ra, rb) => Err(ra.err().into_iter().chain(rb.err()).collect()),
  }
}

/// Result of one orchestration round.
#[derive(Debug)]
pub enum RoundOutcome {
  /// Empty collection: nothing to ask about, no request issued.
  Skipped,
  /// Another round holds the loading flag.
  AlreadyRunning,
  /// Both services answered; insight and suggestion were replaced together.
  Updated,
  /// At least one service failed; the previous values were kept.
  Failed(Vec<AiError>),
}

/// Fans out the insight and suggestion requests and publishes their
/// results as one [`Insights`] value.
pub struct InsightOrchestrator<I, S>
where
  I: InsightService,
  S: SuggestionService,
{
  insight_service: I,
  suggestion_service: S,
  current: Option<Insights>,
  loading: BusyFlag,
}

impl<I, S> InsightOrchestrator<I, S>
where
  I: InsightService,
  S: SuggestionService,
{
  pub fn new(insight_service: I, suggestion_service: S) -> Self {
    Self { insight_service, suggestion_service, current: None, loading: BusyFlag::new() }
  }

  /// Insight and suggestion from the last successful round.
  pub fn current(&self) -> Option<&Insights> {
    self.current.as_ref()
  }

  /// Handle on the shared loading flag.
  pub fn loading_flag(&self) -> BusyFlag {
    self.loading.clone()
  }

  pub fn is_loading(&self) -> bool {
    self.loading.is_set()
  }

  /// Runs one round against `songs`.
  ///
  /// The loading flag is raised before either request starts and cleared
  /// once both have settled, success or not.
  pub async fn refresh(&mut self, songs: &[Song]) -> RoundOutcome {
    if songs.is_empty() {
      debug!("Skipping insight round for empty collection");
      return RoundOutcome::Skipped;
    }

    let Some(_guard) = self.loading.try_raise() else {
      return RoundOutcome::AlreadyRunning;
    };

    debug!(songs = songs.len(), "Requesting insights and suggestion");

    let joined =
      join_settled(self.insight_service.get_insights(songs), self.suggestion_service.suggest_song(songs)).await;

    let result = joined.and_then(|(text, suggestion)| {
      if already_collected(songs, &suggestion) {
        return Err(vec![AiError::InvalidResponse(format!(
          "suggested \"{}\" by {} is already in the collection",
          suggestion.title, suggestion.artist
        ))]);
      }
      Ok(Insights { text, suggestion })
    });

    match result {
      Ok(insights) => {
        info!(suggestion = %insights.suggestion.title, "Insights updated");
        self.current = Some(insights);
        RoundOutcome::Updated
      }
      Err(errors) => {
        for error in &errors {
          warn!(%error, "AI fetch failed, keeping previous insights");
        }
        RoundOutcome::Failed(errors)
      }
    }
  }
}

fn already_collected(songs: &[Song], suggestion: &Suggestion) -> bool {
  let title = suggestion.title.trim().to_lowercase();
  let artist = suggestion.artist.trim().to_lowercase();
  songs.iter().any(|s| s.title.trim().to_lowercase() == title && s.artist.trim().to_lowercase() == artist)
}

/// Decides when a new round is due: whenever the collection size differs
/// from the size seen at the previous check.
///
/// The first check always fires. Edits that keep the size do not.
#[derive(Debug, Clone, Default)]
pub struct AutoRefresh {
  last_len: Option<usize>,
}

impl AutoRefresh {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn needs_refresh(&mut self, len: usize) -> bool {
    if self.last_len == Some(len) {
      return false;
    }
    self.last_len = Some(len);
    true
  }
}
