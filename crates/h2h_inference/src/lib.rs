pub mod composer;
pub mod models;
pub mod prompts;

pub use composer::Composer;
pub use models::{create_models, DummyModel, ModelSet, OpenAiModel};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_NEWS_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CONTENT_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Model configuration, usually read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub news_model: String,
    pub content_model: String,
    pub image_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            news_model: DEFAULT_NEWS_MODEL.to_string(),
            content_model: DEFAULT_CONTENT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from `OPENAI_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            news_model: std::env::var("OPENAI_NEWS_MODEL").unwrap_or(defaults.news_model),
            content_model: std::env::var("OPENAI_CONTENT_MODEL").unwrap_or(defaults.content_model),
            image_model: std::env::var("OPENAI_IMAGE_MODEL").unwrap_or(defaults.image_model),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

pub mod prelude {
    pub use super::models::create_models;
    pub use super::{Composer, Config};
    pub use h2h_core::{Article, Error, Result};
}
