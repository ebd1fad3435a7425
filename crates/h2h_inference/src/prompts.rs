//! Prompt templates for every generative call the pipeline makes.
//!
//! Each function returns the `(system, user)` pair handed to a
//! [`TextModel`](h2h_core::TextModel). The headline templates demand a
//! strict JSON payload; everything downstream is plain text.

use chrono::Utc;
use h2h_core::{Article, ContentKind, ContentRequest, Platform, PostSpec, Tone};

const JSON_SCHEMA_CLAUSE: &str = "Return ONLY valid JSON (no markdown, no commentary).\n\
JSON must be an array of objects with keys:\n\
- title\n\
- description\n\
- source\n\
- published_at  (ISO-like YYYY-MM-DD)\n\
- url";

/// Headline/quote/topic acquisition, per content kind.
pub fn headlines(request: &ContentRequest) -> (String, String) {
    let today = Utc::now().date_naive();
    let system = match request.kind {
        ContentKind::News => format!(
            "You are a global news summarizer.\n{}\n\
             Constraints:\n\
             - Focus on the requested country and category.\n\
             - Return exactly the requested number of items.\n\
             - published_at must be {} or within the last 2 days.\n\
             - Be realistic and timely, but you may invent plausible headlines if needed.\n\
             - Do NOT include anything older than 2 days.",
            JSON_SCHEMA_CLAUSE, today
        ),
        ContentKind::Quotes => format!(
            "You are a curator of notable quotations.\n{}\n\
             Constraints:\n\
             - title is the quote itself, description is one line of context.\n\
             - source is the person quoted.\n\
             - Pick quotes relevant to the requested category.\n\
             - Return exactly the requested number of items.",
            JSON_SCHEMA_CLAUSE
        ),
        ContentKind::AiTopics => format!(
            "You are an AI industry analyst tracking current topics.\n{}\n\
             Constraints:\n\
             - title is the topic headline, description a two-sentence brief.\n\
             - source is the community or outlet where the topic is active.\n\
             - published_at must be {} or within the last 2 days.\n\
             - Return exactly the requested number of items.",
            JSON_SCHEMA_CLAUSE, today
        ),
    };

    let user = format!(
        "Country: {}\nCategory: {}\nNumber of items: {}",
        request.country,
        request.category,
        request.capped_limit()
    );
    (system, user)
}

/// A single platform-constrained post from one article.
pub fn social_post(article: &Article, spec: &PostSpec) -> (String, String) {
    let angle = if spec.custom_angle.is_empty() {
        "Standard news sharing"
    } else {
        spec.custom_angle.as_str()
    };

    let system = format!(
        "You are a social media strategist. Create an engaging {} post.\n\n\
         Requirements:\n\
         - Character limit: {}\n\
         - Tone: {}\n\
         - Style: {}\n\
         - Include hashtags: {}\n\
         - Include link: {}\n\
         - Custom angle: {}\n\
         Return plain text only (no JSON).",
        spec.platform,
        spec.platform.char_limit(),
        spec.tone,
        spec.platform.style(),
        spec.include_hashtags,
        spec.include_link,
        angle
    );

    let url = if spec.include_link {
        article.url.as_deref().unwrap_or("")
    } else {
        ""
    };
    let user = format!(
        "Title: {}\nDescription: {}\nURL: {}",
        article.title, article.description, url
    );
    (system, user)
}

/// A themed multi-post series covering several articles.
pub fn series(articles: &[Article], platform: Platform, theme: &str, tone: Tone) -> (String, String) {
    let system = format!(
        "You are a strategist. Create a {} series with theme '{}'.\n\
         - Tone: {}\n\
         - Provide an intro + one post per article\n\
         - If the platform supports threads, number them like (1/n), (2/n)...\n\
         Return plain text only.",
        platform, theme, tone
    );

    let bullets = articles
        .iter()
        .map(|a| format!("- {}: {}", a.title, a.description))
        .collect::<Vec<_>>()
        .join("\n");
    (system, bullets)
}

/// Sentiment and content-strategy analysis over a batch of articles.
pub fn analysis(articles: &[Article]) -> (String, String) {
    let system = "You are a strategist. Analyze these articles and provide:\n\
         1) Sentiment breakdown (positive/negative/neutral %) and brief justification\n\
         2) Key themes and takeaways\n\
         3) Content strategy recommendations\n\
         4) Best posting times by platform (based on general best practices)\n\
         5) Potential viral angles or hooks\n\
         Return structured text (no JSON)."
        .to_string();

    let lines = articles
        .iter()
        .map(|a| format!("{}: {}", a.title, a.description))
        .collect::<Vec<_>>()
        .join("\n");
    (system, lines)
}

/// Art prompt for the share card behind an article.
pub fn image_prompt(article: &Article) -> String {
    format!(
        "Editorial illustration for a story titled \"{}\". {} \
         Bold modern style, high contrast, no text or lettering in the image.",
        article.title, article.description
    )
}
