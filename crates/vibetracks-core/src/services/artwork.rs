use std::time::Duration;

use tracing::{info, warn};

use crate::domain::PLACEHOLDER_IMAGE_URL;
use crate::ports::{AiError, ArtService};

/// How long a form submission waits for cover art before using the placeholder.
pub const DEFAULT_ART_TIMEOUT: Duration = Duration::from_secs(60);

/// Asks the art service for a cover, bounded by `timeout`.
///
/// Never fails: an error, an empty answer or a timeout all yield
/// [`PLACEHOLDER_IMAGE_URL`].
pub async fn resolve_cover_art<A>(art: &A, title: &str, artist: &str, genre: &str, timeout: Duration) -> String
where
  A: ArtService + ?Sized,
{
  let outcome = match tokio::time::timeout(timeout, art.generate_art(title, artist, genre)).await {
    Ok(result) => result,
    Err(_) => Err(AiError::Timeout),
  };

  match outcome {
    Ok(Some(image)) if !image.trim().is_empty() => {
      info!(%title, %artist, "Generated cover art");
      image
    }
    Ok(_) => {
      warn!(%title, %artist, "Art service returned no image, using placeholder");
      PLACEHOLDER_IMAGE_URL.to_string()
    }
    Err(error) => {
      warn!(%title, %artist, %error, "Cover art generation failed, using placeholder");
      PLACEHOLDER_IMAGE_URL.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;

  enum Art {
    Image(&'static str),
    Empty,
    Blank,
    Fails,
    Hangs,
  }

  #[async_trait]
  impl ArtService for Art {
    async fn generate_art(&self, _title: &str, _artist: &str, _genre: &str) -> Result<Option<String>, AiError> {
      match self {
        Art::Image(url) => Ok(Some(url.to_string())),
        Art::Empty => Ok(None),
        Art::Blank => Ok(Some("  ".into())),
        Art::Fails => Err(AiError::Api { status: 500, message: "overloaded".into() }),
        Art::Hangs => {
          std::future::pending::<()>().await;
          Ok(None)
        }
      }
    }
  }

  async fn resolve(art: Art) -> String {
    resolve_cover_art(&art, "Frozen", "Madonna", "Pop", Duration::from_secs(5)).await
  }

  #[tokio::test]
  async fn generated_image_is_used() {
    assert_eq!(resolve(Art::Image("data:image/png;base64,AAAA")).await, "data:image/png;base64,AAAA");
  }

  #[tokio::test]
  async fn empty_answers_fall_back_to_placeholder() {
    assert_eq!(resolve(Art::Empty).await, PLACEHOLDER_IMAGE_URL);
    assert_eq!(resolve(Art::Blank).await, PLACEHOLDER_IMAGE_URL);
  }

  #[tokio::test]
  async fn failure_falls_back_to_placeholder() {
    assert_eq!(resolve(Art::Fails).await, PLACEHOLDER_IMAGE_URL);
  }

  #[tokio::test(start_paused = true)]
  async fn hanging_service_times_out_to_placeholder() {
    assert_eq!(resolve(Art::Hangs).await, PLACEHOLDER_IMAGE_URL);
  }
}
