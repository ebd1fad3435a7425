use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use h2h_core::{GenerationParams, Result, TextModel};
use h2h_inference::{create_models, Composer, Config, DummyModel};
use h2h_sources::SourceManager;
use h2h_web::{create_app, AppState};

fn dummy_state() -> AppState {
    let set = create_models("dummy", Config::default()).unwrap();
    AppState {
        sources: SourceManager::new(set.news),
        composer: Composer::new(set.content),
        image_model: set.image,
        card_font: None,
    }
}

async fn spawn_app() -> String {
    let app = create_app(dummy_state()).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn oneshot_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let base = spawn_app().await;
    let body: serde_json::Value = reqwest::get(format!("{}/api/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_news_respects_limit() {
    let base = spawn_app().await;
    let body: serde_json::Value =
        reqwest::get(format!("{}/api/generate-news?limit=1&country=ar", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["articles"].as_array().unwrap().len(), 1);
    assert!(body["articles"][0]["title"].is_string());
}

#[tokio::test]
async fn test_create_social_content() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .post(format!("{}/api/create-social-content", base))
        .json(&serde_json::json!({
            "article": { "title": "Big merge", "description": "It landed." },
            "platform": "linkedin",
            "tone": "professional"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["platform"], "linkedin");
    assert!(body["content"].as_str().unwrap().contains("Big merge"));
}

#[tokio::test]
async fn test_series_needs_two_articles() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/create-content-series", base))
        .json(&serde_json::json!({
            "articles": [{ "title": "solo" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    let body: serde_json::Value = client
        .post(format!("{}/api/create-content-series", base))
        .json(&serde_json::json!({
            "articles": [{ "title": "one" }, { "title": "two" }],
            "theme": "weekly wrap"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["theme"], "weekly wrap");
    assert!(body["series"].is_string());
}

#[tokio::test]
async fn test_analyze_news() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .post(format!("{}/api/analyze-news", base))
        .json(&serde_json::json!({
            "articles": [{ "title": "up", "description": "good" }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert!(body["analysis"].is_string());
}

#[tokio::test]
async fn test_router_health_oneshot() {
    let app = create_app(dummy_state()).await;
    let (status, body) = oneshot_json(app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

/// A model that ignores the strict-JSON instruction and chats instead.
struct ProseModel;

#[async_trait]
impl TextModel for ProseModel {
    fn name(&self) -> &str {
        "Prose"
    }

    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _params: GenerationParams,
    ) -> Result<String> {
        Ok("Here are your headlines!".to_string())
    }
}

#[tokio::test]
async fn test_prose_payload_maps_to_502_with_raw_text() {
    let state = AppState {
        sources: SourceManager::new(Arc::new(ProseModel)),
        composer: Composer::new(Arc::new(DummyModel)),
        image_model: None,
        card_font: None,
    };
    let app = create_app(state).await;

    let (status, body) = oneshot_json(app, "/api/generate-news?limit=2").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
    // The model's text rides along verbatim
    assert_eq!(body["raw"], "Here are your headlines!");
}

#[tokio::test]
async fn test_keyless_backend_maps_to_400() {
    let set = create_models("openai", Config::default()).unwrap();
    let state = AppState {
        sources: SourceManager::new(set.news),
        composer: Composer::new(set.content),
        image_model: None,
        card_font: None,
    };
    let app = create_app(state).await;

    let (status, body) = oneshot_json(app, "/api/generate-news").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn test_render_card_requires_font() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/render-card", base))
        .json(&serde_json::json!({
            "article": { "title": "no font configured" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
