use std::sync::Arc;

use async_trait::async_trait;

use h2h_core::{Article, ContentRequest, ContentSource, Error, GenerationParams, Result, TextModel};
use h2h_inference::prompts;

const HEADLINE_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.5,
    max_tokens: 600,
};

/// Acquires articles by asking a text model for a strict JSON array.
pub struct GeneratedSource {
    model: Arc<dyn TextModel>,
}

impl GeneratedSource {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }
}

/// Models love wrapping JSON in markdown fences despite instructions.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(rest) => {
            // drop the info string on the opening fence line
            let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
            rest.trim_end().strip_suffix("```").unwrap_or(rest)
        }
        None => trimmed,
    };
    body.trim()
}

/// Parse and validate the model payload. The raw text is preserved in
/// the error so callers can surface it verbatim.
fn normalize_payload(raw: &str) -> Result<Vec<Article>> {
    let cleaned = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|e| Error::ModelPayload {
            reason: format!("Invalid JSON from model: {}", e),
            raw: raw.to_string(),
        })?;

    if !value.is_array() {
        return Err(Error::ModelPayload {
            reason: "Expected list of articles".to_string(),
            raw: raw.to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| Error::ModelPayload {
        reason: format!("Malformed article object: {}", e),
        raw: raw.to_string(),
    })
}

#[async_trait]
impl ContentSource for GeneratedSource {
    fn name(&self) -> &str {
        "generated"
    }

    async fn fetch(&self, request: &ContentRequest) -> Result<Vec<Article>> {
        let (system, user) = prompts::headlines(request);
        let raw = self.model.complete(&system, &user, HEADLINE_PARAMS).await?;

        let mut articles = normalize_payload(&raw)?;
        // Never trust the model to honor the item count
        articles.truncate(request.capped_limit());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2h_inference::DummyModel;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("[1]"), "[1]");
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  ```json\n[1, 2]\n```  "), "[1, 2]");
    }

    #[test]
    fn test_normalize_payload_accepts_fenced_array() {
        let raw = "```json\n[{\"title\": \"A\"}]\n```";
        let articles = normalize_payload(raw).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
    }

    #[test]
    fn test_normalize_payload_rejects_object() {
        let err = normalize_payload("{\"title\": \"A\"}").unwrap_err();
        match err {
            Error::ModelPayload { reason, raw } => {
                assert!(reason.contains("Expected list"));
                assert!(raw.contains("title"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_normalize_payload_rejects_prose() {
        let err = normalize_payload("Here are your headlines!").unwrap_err();
        assert!(matches!(err, Error::ModelPayload { .. }));
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_limit() {
        let source = GeneratedSource::new(Arc::new(DummyModel));
        let request = ContentRequest {
            limit: 1,
            ..Default::default()
        };
        let articles = source.fetch(&request).await.unwrap();
        assert_eq!(articles.len(), 1);
    }
}
