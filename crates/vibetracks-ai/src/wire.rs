//! Request and response bodies of the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
  pub contents: Vec<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
  pub fn prompt(text: String) -> Self {
    Self { contents: vec![Content { role: Some("user".to_string()), parts: vec![Part::text(text)] }], generation_config: None }
  }

  pub fn with_config(mut self, config: GenerationConfig) -> Self {
    self.generation_config = Some(config);
    self
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[serde(default)]
  pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub inline_data: Option<InlineData>,
}

impl Part {
  fn text(text: String) -> Self {
    Self { text: Some(text), inline_data: None }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
  pub mime_type: String,
  /// Base64 payload.
  pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_schema: Option<serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
  pub content: Option<Content>,
  pub finish_reason: Option<String>,
}

impl GenerateResponse {
  fn parts(&self) -> impl Iterator<Item = &Part> {
    self.candidates.first().and_then(|c| c.content.as_ref()).into_iter().flat_map(|c| c.parts.iter())
  }

  /// Concatenated text of the first candidate.
  pub fn text(&self) -> String {
    self.parts().filter_map(|p| p.text.as_deref()).collect::<Vec<_>>().join("")
  }

  /// First inline image of the first candidate, as a `data:` URI.
  pub fn image_data_uri(&self) -> Option<String> {
    self
      .parts()
      .filter_map(|p| p.inline_data.as_ref())
      .find(|d| d.mime_type.starts_with("image/") && !d.data.is_empty())
      .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
  }

  pub fn finish_reason(&self) -> Option<&str> {
    self.candidates.first().and_then(|c| c.finish_reason.as_deref())
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
  pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
  #[serde(default)]
  pub message: String,
}
