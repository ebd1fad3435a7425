use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hard cap on how many items a single request may ask for.
pub const MAX_ITEMS: usize = 20;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_limit() -> usize {
    5
}

/// The uniform shape every acquisition path normalizes into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default = "today")]
    pub published_at: NaiveDate,
    #[serde(default)]
    pub url: Option<String>,
}

/// What family of content a request is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    #[default]
    News,
    Quotes,
    AiTopics,
}

impl FromStr for ContentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "news" => Ok(ContentKind::News),
            "quotes" => Ok(ContentKind::Quotes),
            "ai-topics" | "ai_topics" | "topics" => Ok(ContentKind::AiTopics),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown content kind: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::News => "news",
            ContentKind::Quotes => "quotes",
            ContentKind::AiTopics => "ai-topics",
        };
        write!(f, "{}", s)
    }
}

/// A content-acquisition request. Doubles as the query shape of the
/// generate-news endpoint, so every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub feed: Option<String>,
}

impl Default for ContentRequest {
    fn default() -> Self {
        Self {
            kind: ContentKind::News,
            country: default_country(),
            category: default_category(),
            limit: default_limit(),
            feed: None,
        }
    }
}

impl ContentRequest {
    /// The requested item count, clamped to [1, MAX_ITEMS].
    pub fn capped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_ITEMS)
    }
}

/// Target platform for a generated post. Each carries the character
/// budget and the house style the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Linkedin,
    Instagram,
    Facebook,
    Tiktok,
}

impl Platform {
    pub fn char_limit(&self) -> usize {
        match self {
            Platform::Twitter => 280,
            Platform::Linkedin => 700,
            Platform::Instagram => 500,
            Platform::Facebook => 400,
            Platform::Tiktok => 300,
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Platform::Twitter => "concise and engaging",
            Platform::Linkedin => "professional and insightful",
            Platform::Instagram => "visual and catchy",
            Platform::Facebook => "conversational",
            Platform::Tiktok => "trendy and casual",
        }
    }

    /// Parse leniently: unknown platforms fall back to Twitter, the
    /// smallest character budget.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Platform {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::Linkedin),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "tiktok" => Ok(Platform::Tiktok),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown platform: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
        };
        write!(f, "{}", s)
    }
}

/// Voice the generated copy should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Informative,
    Casual,
    Humorous,
    Professional,
    Inspirational,
}

impl Tone {
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Tone {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "informative" => Ok(Tone::Informative),
            "casual" => Ok(Tone::Casual),
            "humorous" => Ok(Tone::Humorous),
            "professional" => Ok(Tone::Professional),
            "inspirational" => Ok(Tone::Inspirational),
            other => Err(crate::Error::InvalidInput(format!("Unknown tone: {}", other))),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tone::Informative => "informative",
            Tone::Casual => "casual",
            Tone::Humorous => "humorous",
            Tone::Professional => "professional",
            Tone::Inspirational => "inspirational",
        };
        write!(f, "{}", s)
    }
}

/// Knobs a single post-generation request carries on top of the article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSpec {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default = "default_true")]
    pub include_hashtags: bool,
    #[serde(default = "default_true")]
    pub include_link: bool,
    #[serde(default)]
    pub custom_angle: String,
}

fn default_true() -> bool {
    true
}

impl Default for PostSpec {
    fn default() -> Self {
        Self {
            platform: Platform::Twitter,
            tone: Tone::Informative,
            include_hashtags: true,
            include_link: true,
            custom_angle: String::new(),
        }
    }
}

/// Sampling parameters for a single generative call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A generated image as the vendor returned it.
#[derive(Debug, Clone)]
pub enum ImageData {
    Base64(String),
    Url(String),
}
