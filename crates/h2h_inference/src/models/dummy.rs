use std::fmt;

use async_trait::async_trait;
use chrono::Utc;

use h2h_core::{GenerationParams, ImageData, ImageModel, Result, TextModel};

/// Deterministic offline model for tests and dry runs.
///
/// Prompts that demand a JSON payload get a small fixed article array;
/// everything else gets the leading words of the user prompt back.
pub struct DummyModel;

/// 1x1 PNG, the smallest payload the render path will accept.
pub const TINY_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait]
impl TextModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        _params: GenerationParams,
    ) -> Result<String> {
        if system.contains("valid JSON") {
            let today = Utc::now().date_naive();
            let payload = serde_json::json!([
                {
                    "title": "Placeholder headline one",
                    "description": "A stand-in item for offline runs.",
                    "source": "Dummy Wire",
                    "published_at": today.to_string(),
                    "url": "https://example.com/one"
                },
                {
                    "title": "Placeholder headline two",
                    "description": "Another stand-in item.",
                    "source": "Dummy Wire",
                    "published_at": today.to_string(),
                    "url": "https://example.com/two"
                }
            ]);
            return Ok(payload.to_string());
        }

        let words: Vec<&str> = user.split_whitespace().take(30).collect();
        Ok(words.join(" "))
    }
}

#[async_trait]
impl ImageModel for DummyModel {
    async fn generate_image(&self, _prompt: &str, _size: &str) -> Result<ImageData> {
        Ok(ImageData::Base64(TINY_PNG_B64.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: GenerationParams = GenerationParams {
        temperature: 0.5,
        max_tokens: 600,
    };

    #[tokio::test]
    async fn test_dummy_json_prompt_yields_article_array() {
        let out = DummyModel
            .complete("Return ONLY valid JSON", "Number of items: 2", PARAMS)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dummy_plain_prompt_echoes_user() {
        let out = DummyModel
            .complete("You are a strategist.", "Title: hello world", PARAMS)
            .await
            .unwrap();
        assert!(out.contains("hello world"));
    }
}
