//! Gemini `generateContent` client.
//!
//! One client backs all three AI ports. A missing API key is reported per
//! call as [`AiError::MissingApiKey`], so the session keeps running and
//! every feature falls back.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use vibetracks_core::domain::{Song, Suggestion};
use vibetracks_core::ports::{AiError, ArtService, InsightService, SuggestionService};

use crate::config::AiConfig;
use crate::prompt;
use crate::wire::{ErrorEnvelope, GenerateRequest, GenerateResponse, GenerationConfig};

const USER_AGENT: &str = concat!("VibeTracks/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
  text_model: String,
  image_model: String,
}

impl GeminiClient {
  pub fn new(config: &AiConfig) -> Result<Self, AiError> {
    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .build()
      .map_err(|e| AiError::Transport(e.to_string()))?;

    Ok(Self {
      http,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key().map(str::to_string),
      text_model: config.text_model.clone(),
      image_model: config.image_model.clone(),
    })
  }

  pub fn has_api_key(&self) -> bool {
    self.api_key.is_some()
  }

  fn endpoint(&self, model: &str) -> String {
    format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
  }

  async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse, AiError> {
    let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
    let url = self.endpoint(model);

    debug!(model, url = %url, "Calling Gemini");

    let response =
      self.http.post(&url).header(API_KEY_HEADER, api_key).json(request).send().await.map_err(map_transport)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ErrorEnvelope>(&body).map(|e| e.error.message).unwrap_or(body);
      return Err(AiError::Api { status: status.as_u16(), message });
    }

    response.json::<GenerateResponse>().await.map_err(|e| AiError::InvalidResponse(e.to_string()))
  }

  async fn generate_text(&self, request: GenerateRequest) -> Result<String, AiError> {
    let response = self.generate(&self.text_model, &request).await?;
    let text = response.text();
    if text.trim().is_empty() {
      let reason = response.finish_reason().unwrap_or("no candidates");
      return Err(AiError::InvalidResponse(format!("empty answer ({reason})")));
    }
    Ok(text.trim().to_string())
  }
}

fn map_transport(err: reqwest::Error) -> AiError {
  if err.is_timeout() { AiError::Timeout } else { AiError::Transport(err.to_string()) }
}

/// Parses the JSON suggestion, tolerating a surrounding markdown fence.
fn parse_suggestion(text: &str) -> Result<Suggestion, AiError> {
  let body = text.trim().trim_start_matches("```json").trim_start_matches("```").trim_end_matches("```").trim();
  let suggestion: Suggestion =
    serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(format!("suggestion is not valid JSON: {e}")))?;

  if suggestion.title.trim().is_empty() || suggestion.artist.trim().is_empty() {
    return Err(AiError::InvalidResponse("suggestion without title or artist".to_string()));
  }
  Ok(suggestion)
}

#[async_trait]
impl InsightService for GeminiClient {
  async fn get_insights(&self, songs: &[Song]) -> Result<String, AiError> {
    self.generate_text(GenerateRequest::prompt(prompt::insights(songs))).await
  }
}

#[async_trait]
impl SuggestionService for GeminiClient {
  async fn suggest_song(&self, songs: &[Song]) -> Result<Suggestion, AiError> {
    let request = GenerateRequest::prompt(prompt::suggestion(songs)).with_config(GenerationConfig {
      response_mime_type: Some("application/json".to_string()),
      response_schema: Some(prompt::suggestion_schema()),
      ..Default::default()
    });

    let text = self.generate_text(request).await?;
    parse_suggestion(&text)
  }
}

#[async_trait]
impl ArtService for GeminiClient {
  async fn generate_art(&self, title: &str, artist: &str, genre: &str) -> Result<Option<String>, AiError> {
    let request = GenerateRequest::prompt(prompt::cover_art(title, artist, genre)).with_config(GenerationConfig {
      response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
      ..Default::default()
    });

    let response = self.generate(&self.image_model, &request).await?;
    let image = response.image_data_uri();
    if image.is_some() {
      info!(%title, model = %self.image_model, "Received cover art");
    }
    Ok(image)
  }
}
