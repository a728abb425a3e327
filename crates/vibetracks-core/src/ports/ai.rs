use async_trait::async_trait;

use crate::domain::{Song, Suggestion};

/// Failure of an external AI service.
///
/// Every variant is treated as transient by the core: the caller keeps its
/// previous values (or substitutes a placeholder) and logs the error.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
  #[error("no API key configured")]
  MissingApiKey,

  #[error("transport error: {0}")]
  Transport(String),

  #[error("api error {status}: {message}")]
  Api { status: u16, message: String },

  #[error("invalid response: {0}")]
  InvalidResponse(String),

  #[error("request timed out")]
  Timeout,
}

/// Port producing a short free-text insight about the collection's
/// overall mood and genre mix.
#[async_trait]
pub trait InsightService: Send + Sync {
  async fn get_insights(&self, songs: &[Song]) -> Result<String, AiError>;
}

/// Port recommending one song that is not already in the collection.
#[async_trait]
pub trait SuggestionService: Send + Sync {
  async fn suggest_song(&self, songs: &[Song]) -> Result<Suggestion, AiError>;
}

/// Port generating cover art for a song about to be saved.
///
/// `Ok(None)` means the service answered without an image; callers treat
/// it the same as a failure and fall back to the placeholder.
#[async_trait]
pub trait ArtService: Send + Sync {
  async fn generate_art(&self, title: &str, artist: &str, genre: &str) -> Result<Option<String>, AiError>;
}
