//! Suggestions and auto-categorization that degrade instead of failing.

use crate::client::{ClientError, GeminiClient};
use crate::prompts::{categorize_prompt, suggestion_prompt};
use promptvault_core::AssetKind;
use serde::Deserialize;

/// Shown in place of a suggestion when the model cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str =
    "AI Assistant unavailable. Please check your API configuration.";

/// Category and tags proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Categorization {
    /// Proposed category; may be empty
    #[serde(default)]
    pub category: String,
    /// Proposed tags, possibly without `#`
    #[serde(default)]
    pub tags: Vec<String>,
}

/// AI helper over a [`GeminiClient`].
pub struct Assistant {
    client: GeminiClient,
}

impl Assistant {
    /// Wrap a client.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Suggestion text for `content`, or [`UNAVAILABLE_MESSAGE`] on any
    /// failure.
    pub async fn suggest(&self, content: &str, kind: AssetKind) -> String {
        match self.client.generate(&suggestion_prompt(content, kind), None).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, kind = %kind, "Suggestion failed");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// Category and tags for `content`, or `None` on any failure.
    pub async fn auto_categorize(
        &self,
        content: &str,
        categories: &[&str],
    ) -> Option<Categorization> {
        let result = self
            .client
            .generate(&categorize_prompt(content, categories), Some("application/json"))
            .await
            .and_then(|text| parse_categorization(&text));

        match result {
            Ok(categorization) => Some(categorization),
            Err(e) => {
                tracing::warn!(error = %e, "Auto-categorize failed");
                None
            }
        }
    }
}

/// Parse the model's JSON answer, tolerating a Markdown code fence.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] if the text is not the expected JSON.
pub fn parse_categorization(text: &str) -> Result<Categorization, ClientError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fenced_json() {
        let plain = parse_categorization(r##"{"category": "Coding", "tags": ["#Rust", "cli"]}"##)
            .unwrap();
        assert_eq!(plain.category, "Coding");
        assert_eq!(plain.tags, ["#Rust", "cli"]);

        let fenced = parse_categorization("```json\n{\"category\": \"Business\"}\n```").unwrap();
        assert_eq!(fenced.category, "Business");
        assert!(fenced.tags.is_empty());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_categorization("Coding, obviously"),
            Err(ClientError::Parse(_))
        ));
    }
}
