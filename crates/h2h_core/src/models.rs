use async_trait::async_trait;

use crate::types::{Article, ContentRequest, GenerationParams, ImageData};
use crate::Result;

#[async_trait]
pub trait TextModel: Send + Sync {
    /// Human-readable name of the backing model
    fn name(&self) -> &str;

    /// Run one system+user completion and return the raw text
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: GenerationParams,
    ) -> Result<String>;
}

#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate an image for the given prompt
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<ImageData>;
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the name of the content source
    fn name(&self) -> &str;

    /// Fetch articles for the given request, already normalized and
    /// truncated to the request's limit
    async fn fetch(&self, request: &ContentRequest) -> Result<Vec<Article>>;
}
