use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use h2h_core::{Error, GenerationParams, ImageData, ImageModel, Result, TextModel};

use super::{ChatMessage, ChatRequest, ChatResponse, ImageRequest, ImageResponse};
use crate::Config;

/// Chat-completions client against an OpenAI-compatible endpoint.
///
/// One instance is pinned to one chat model; the same instance also
/// serves image generation through the configured image model.
pub struct OpenAiModel {
    client: Arc<Client>,
    config: Config,
    model: String,
}

impl OpenAiModel {
    fn with_model(config: Config, model: String) -> Self {
        // Generative calls can be slow, give them a generous timeout
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client: Arc::new(client),
            config,
            model,
        }
    }

    /// Client pinned to the headline-generation model.
    pub fn news(config: Config) -> Self {
        let model = config.news_model.clone();
        Self::with_model(config, model)
    }

    /// Client pinned to the content-generation model.
    pub fn content(config: Config) -> Self {
        let model = config.content_model.clone();
        Self::with_model(config, model)
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: GenerationParams,
    ) -> Result<String> {
        let api_key = self.api_key()?;
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "chat completion failed ({}): {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference("chat response had no choices".to_string()))?;
        Ok(content)
    }
}

#[async_trait]
impl ImageModel for OpenAiModel {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<ImageData> {
        let api_key = self.api_key()?;
        let request = ImageRequest {
            model: self.config.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.to_string(),
            response_format: "b64_json".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "image generation failed ({}): {}",
                status, body
            )));
        }

        let parsed: ImageResponse = response.json().await?;
        let item = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference("image response had no data".to_string()))?;

        if let Some(b64) = item.b64_json {
            Ok(ImageData::Base64(b64))
        } else if let Some(url) = item.url {
            Ok(ImageData::Url(url))
        } else {
            Err(Error::Inference(
                "image response had neither b64_json nor url".to_string(),
            ))
        }
    }
}
