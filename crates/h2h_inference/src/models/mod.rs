use std::sync::Arc;

use serde::{Deserialize, Serialize};

use h2h_core::{Error, ImageModel, Result, TextModel};

use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

#[derive(Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Deserialize)]
pub(crate) struct Message {
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub response_format: String,
}

#[derive(Deserialize)]
pub(crate) struct ImageResponse {
    pub data: Vec<ImageItem>,
}

#[derive(Deserialize)]
pub(crate) struct ImageItem {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The full set of models one run of the pipeline needs: a headline
/// model, a content model, and optionally an image model.
pub struct ModelSet {
    pub news: Arc<dyn TextModel>,
    pub content: Arc<dyn TextModel>,
    pub image: Option<Arc<dyn ImageModel>>,
}

/// Build a [`ModelSet`] from a backend name (`openai` or `dummy`).
pub fn create_models(kind: &str, config: Config) -> Result<ModelSet> {
    match kind {
        "openai" => {
            let news = Arc::new(OpenAiModel::news(config.clone()));
            let content = Arc::new(OpenAiModel::content(config.clone()));
            let image = Arc::new(OpenAiModel::content(config));
            Ok(ModelSet {
                news,
                content,
                image: Some(image),
            })
        }
        "dummy" => {
            let model = Arc::new(DummyModel);
            Ok(ModelSet {
                news: model.clone(),
                content: model.clone(),
                image: Some(model),
            })
        }
        other => Err(Error::Inference(format!("Unknown model backend: {}", other))),
    }
}
