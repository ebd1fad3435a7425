//! The second-stage generative calls: posts, series, analyses.
//!
//! Owns the content model and the per-operation sampling parameters;
//! the digests handed to the series/analysis prompts are built here so
//! handlers only ever pass normalized [`Article`]s through.

use std::sync::Arc;

use tracing::debug;

use h2h_core::{Article, Error, GenerationParams, Platform, PostSpec, Result, TextModel, Tone};

use crate::prompts;

/// Series prompts digest at most this many articles.
pub const MAX_SERIES_ARTICLES: usize = 5;
/// Analysis prompts digest at most this many articles.
pub const MAX_ANALYSIS_ARTICLES: usize = 10;

const POST_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.7,
    max_tokens: 400,
};
const SERIES_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.7,
    max_tokens: 900,
};
const ANALYSIS_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.6,
    max_tokens: 900,
};

pub struct Composer {
    model: Arc<dyn TextModel>,
}

impl Composer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// One platform-constrained post for one article.
    pub async fn create_post(&self, article: &Article, spec: &PostSpec) -> Result<String> {
        debug!(model = self.model.name(), platform = %spec.platform, "creating post");
        let (system, user) = prompts::social_post(article, spec);
        let content = self.model.complete(&system, &user, POST_PARAMS).await?;
        Ok(content.trim().to_string())
    }

    /// A themed series covering several articles. Rejects fewer than
    /// two articles before any network call.
    pub async fn create_series(
        &self,
        articles: &[Article],
        platform: Platform,
        theme: &str,
        tone: Tone,
    ) -> Result<String> {
        if articles.len() < 2 {
            return Err(Error::InvalidInput(
                "Need at least 2 articles".to_string(),
            ));
        }
        let batch = &articles[..articles.len().min(MAX_SERIES_ARTICLES)];
        debug!(model = self.model.name(), count = batch.len(), "creating series");
        let (system, user) = prompts::series(batch, platform, theme, tone);
        let content = self.model.complete(&system, &user, SERIES_PARAMS).await?;
        Ok(content.trim().to_string())
    }

    /// Sentiment and strategy analysis over a batch of articles.
    pub async fn analyze(&self, articles: &[Article]) -> Result<String> {
        let batch = &articles[..articles.len().min(MAX_ANALYSIS_ARTICLES)];
        debug!(model = self.model.name(), count = batch.len(), "analyzing articles");
        let (system, user) = prompts::analysis(batch);
        let content = self.model.complete(&system, &user, ANALYSIS_PARAMS).await?;
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DummyModel;

    fn article(title: &str) -> Article {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "description": "desc",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_post_returns_text() {
        let composer = Composer::new(Arc::new(DummyModel));
        let post = composer
            .create_post(&article("Big news"), &PostSpec::default())
            .await
            .unwrap();
        assert!(post.contains("Big news"));
    }

    #[tokio::test]
    async fn test_series_rejects_single_article() {
        let composer = Composer::new(Arc::new(DummyModel));
        let err = composer
            .create_series(&[article("solo")], Platform::Twitter, "roundup", Tone::Casual)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_series_accepts_two_articles() {
        let composer = Composer::new(Arc::new(DummyModel));
        let series = composer
            .create_series(
                &[article("one"), article("two")],
                Platform::Linkedin,
                "daily roundup",
                Tone::Informative,
            )
            .await
            .unwrap();
        assert!(!series.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_handles_empty_batch() {
        let composer = Composer::new(Arc::new(DummyModel));
        // An empty batch still yields a (vacuous) analysis rather than a panic
        assert!(composer.analyze(&[]).await.is_ok());
    }
}
