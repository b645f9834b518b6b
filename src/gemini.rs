//! Gemini text-generation client.
//!
//! Wraps the `generateContent` REST endpoint behind the minimal
//! [`TextGenerator`] capability, so the map-reduce pipeline can run
//! against a scripted generator in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string sent with every API request
const USER_AGENT: &str = concat!("ozet/", env!("CARGO_PKG_VERSION"), " (https://github.com/cladam/ozet)");

/// Timeout for a single generation request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Minimal capability the pipeline needs from an LLM: one prompt in, one
/// generated text out. Any failure is fatal for the invocation.
pub trait TextGenerator {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or None when the response carries no
    /// usable text (empty candidate list, blocked prompt, ...).
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Strip an optional `models/` prefix so both `gemini-2.5-flash-lite` and
/// `models/gemini-2.5-flash-lite` address the same endpoint.
pub fn sanitize_model(model: &str) -> &str {
    let model = model.trim();
    model.strip_prefix("models/").unwrap_or(model)
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client for the given key and model name.
    pub fn new(api_key: &str, model: &str) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: sanitize_model(model).to_string(),
        })
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", API_BASE_URL, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_model_strips_prefix_and_whitespace() {
        assert_eq!(sanitize_model("gemini-2.5-flash-lite"), "gemini-2.5-flash-lite");
        assert_eq!(sanitize_model("models/gemini-1.5-pro"), "gemini-1.5-pro");
        assert_eq!(sanitize_model("  models/gemini-2.0-flash  "), "gemini-2.0-flash");
    }

    #[test]
    fn response_text_reads_the_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Özet "}, {"text": "metni."}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Özet metni."));
    }

    #[test]
    fn empty_or_blank_candidates_yield_no_text() {
        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(empty.text().is_none());

        let blank: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#,
        )
        .unwrap();
        assert!(blank.text().is_none());

        let no_content: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(no_content.text().is_none());
    }

    #[test]
    fn api_error_body_parses() {
        let json = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "Quota exceeded");
    }

    #[test]
    fn request_serialises_to_the_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "merhaba".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "merhaba");
    }
}
