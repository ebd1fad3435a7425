use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use h2h_core::{Article, ContentRequest, Error, Platform, PostSpec, Tone};
use h2h_inference::prompts;
use h2h_render::CardStyle;

use crate::AppState;

/// Maps pipeline errors onto the `{ success: false, error }` envelope
/// with a status per variant. Raw model text rides along on payload
/// errors so clients can inspect what the model actually said.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::MissingApiKey | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::ModelPayload { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("request failed: {}", self.0);

        let body = match self.0 {
            Error::ModelPayload { reason, raw } => {
                json!({ "success": false, "error": reason, "raw": raw })
            }
            other => json!({ "success": false, "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Headlines to Hashtags API running" }))
}

pub async fn generate_news(
    State(state): State<Arc<AppState>>,
    Query(request): Query<ContentRequest>,
) -> Result<Json<Value>, ApiError> {
    let articles = state.sources.acquire(&request).await?;
    Ok(Json(json!({
        "success": true,
        "count": articles.len(),
        "articles": articles,
    })))
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "daily roundup".to_string()
}

#[derive(Deserialize)]
pub struct CreateContentBody {
    article: Article,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default = "default_true")]
    include_hashtags: bool,
    #[serde(default = "default_true")]
    include_link: bool,
    #[serde(default)]
    custom_angle: String,
}

pub async fn create_social_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateContentBody>,
) -> Result<Json<Value>, ApiError> {
    let platform = Platform::parse_lenient(body.platform.as_deref().unwrap_or_default());
    let spec = PostSpec {
        platform,
        tone: Tone::parse_lenient(body.tone.as_deref().unwrap_or_default()),
        include_hashtags: body.include_hashtags,
        include_link: body.include_link,
        custom_angle: body.custom_angle,
    };

    let content = state.composer.create_post(&body.article, &spec).await?;
    Ok(Json(json!({
        "success": true,
        "content": content,
        "platform": platform,
    })))
}

#[derive(Deserialize)]
pub struct CreateSeriesBody {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default = "default_theme")]
    theme: String,
    #[serde(default)]
    tone: Option<String>,
}

pub async fn create_content_series(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSeriesBody>,
) -> Result<Json<Value>, ApiError> {
    let platform = Platform::parse_lenient(body.platform.as_deref().unwrap_or_default());
    let tone = Tone::parse_lenient(body.tone.as_deref().unwrap_or_default());

    let series = state
        .composer
        .create_series(&body.articles, platform, &body.theme, tone)
        .await?;
    Ok(Json(json!({
        "success": true,
        "series": series,
        "platform": platform,
        "theme": body.theme,
    })))
}

#[derive(Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    articles: Vec<Article>,
}

pub async fn analyze_news(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<Value>, ApiError> {
    let analysis = state.composer.analyze(&body.articles).await?;
    Ok(Json(json!({ "success": true, "analysis": analysis })))
}

fn default_size() -> String {
    "1024x1024".to_string()
}

#[derive(Deserialize)]
pub struct RenderCardBody {
    article: Article,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default = "default_size")]
    size: String,
}

pub async fn render_card(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RenderCardBody>,
) -> Result<Response, ApiError> {
    let image_model = state
        .image_model
        .as_ref()
        .ok_or_else(|| Error::InvalidInput("No image model configured".to_string()))?;
    let font_path = state
        .card_font
        .as_ref()
        .ok_or_else(|| Error::InvalidInput("No card font configured".to_string()))?;

    let prompt = prompts::image_prompt(&body.article);
    let data = image_model.generate_image(&prompt, &body.size).await?;
    let bytes = h2h_render::resolve_image(&data).await?;

    let font = h2h_render::load_font(font_path)?;
    let caption = body.caption.unwrap_or(body.article.title);
    let png = h2h_render::render_card(&bytes, &caption, &font, &CardStyle::default())?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
