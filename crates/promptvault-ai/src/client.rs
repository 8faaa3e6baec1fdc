//! HTTP client for the Gemini `generateContent` API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default API root.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model, chosen for fast interactive responses.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root (e.g., <https://generativelanguage.googleapis.com/v1beta>)
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
    /// API key; requests fail with [`ClientError::MissingApiKey`] without one
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// HTTP client for text generation.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    url: Url,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn new(config: GeminiConfig) -> Result<Self, ClientError> {
        let url = generate_url(&config.endpoint, &config.model)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;

        tracing::debug!(url = %url, "Configured Gemini client");
        Ok(Self {
            client,
            config,
            url,
        })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Generate text for `prompt`.
    ///
    /// When `response_mime_type` is set (e.g. `application/json`) the model
    /// is asked to answer in that format.
    ///
    /// # Errors
    ///
    /// Returns error when no key is configured, on network or API errors, or
    /// when the response carries no text.
    pub async fn generate(
        &self,
        prompt: &str,
        response_mime_type: Option<&str>,
    ) -> Result<String, ClientError> {
        let api_key = self.api_key().ok_or(ClientError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: response_mime_type.map(|mime| GenerationConfig {
                response_mime_type: mime.to_string(),
            }),
        };

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "POST generateContent");

        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        parsed
            .text()
            .ok_or_else(|| ClientError::Parse("response contained no text".to_string()))
    }
}

fn generate_url(endpoint: &str, model: &str) -> Result<Url, ClientError> {
    let raw = format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    );
    Url::parse(&raw).map_err(|e| ClientError::Init(format!("invalid endpoint {endpoint:?}: {e}")))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Errors that can occur with the Gemini client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Client initialization failed
    #[error("client init error: {0}")]
    Init(String),
    /// No API key configured
    #[error("no API key configured")]
    MissingApiKey,
    /// HTTP request failed
    #[error("request error: {0}")]
    Request(String),
    /// API returned an error status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
    /// Response parsing failed
    #[error("parse error: {0}")]
    Parse(String),
}
