use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rss::Channel;
use scraper::Html;

use h2h_core::{Article, ContentRequest, ContentSource, Error, Result};

/// Items older than this many days are dropped.
const RECENCY_DAYS: i64 = 2;

/// Acquires articles from one RSS feed URL.
pub struct RssSource {
    feed_url: String,
}

impl RssSource {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }
}

fn parse_pub_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc).date_naive())
}

/// RSS descriptions are HTML fragments; keep only their text.
fn strip_html(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl ContentSource for RssSource {
    fn name(&self) -> &str {
        "rss"
    }

    async fn fetch(&self, request: &ContentRequest) -> Result<Vec<Article>> {
        let response = reqwest::get(&self.feed_url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let channel = Channel::read_from(&bytes[..])
            .map_err(|e| Error::Source(format!("Failed to parse feed: {}", e)))?;

        let today = Utc::now().date_naive();
        let cutoff = today - Duration::days(RECENCY_DAYS);
        let source_name = channel.title().to_string();

        let mut articles = Vec::new();
        for item in channel.items() {
            // Untitled items are useless downstream
            let title = match item.title() {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                _ => continue,
            };

            let published_at = item
                .pub_date()
                .and_then(parse_pub_date)
                .unwrap_or(today);
            if published_at < cutoff {
                continue;
            }

            articles.push(Article {
                title,
                description: item.description().map(strip_html).unwrap_or_default(),
                source: source_name.clone(),
                published_at,
                url: item.link().map(|l| l.to_string()),
            });

            if articles.len() == request.capped_limit() {
                break;
            }
        }

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn feed_xml(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Test Wire</title>
<link>https://example.com</link>
<description>test feed</description>
{}
</channel></rss>"#,
            items
        )
    }

    fn item(title: &str, date: DateTime<Utc>) -> String {
        format!(
            "<item><title>{}</title><link>https://example.com/a</link>\
             <description>&lt;p&gt;Some &lt;b&gt;bold&lt;/b&gt; text&lt;/p&gt;</description>\
             <pubDate>{}</pubDate></item>",
            title,
            date.to_rfc2822()
        )
    }

    #[tokio::test]
    async fn test_fetch_normalizes_items() {
        let server = MockServer::start();
        let body = feed_xml(&item("Fresh story", Utc::now()));
        server.mock(|when, then| {
            when.method(GET).path("/feed.xml");
            then.status(200)
                .header("Content-Type", "application/rss+xml")
                .body(body);
        });

        let source = RssSource::new(server.url("/feed.xml"));
        let articles = source.fetch(&ContentRequest::default()).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Fresh story");
        assert_eq!(articles[0].source, "Test Wire");
        assert_eq!(articles[0].description, "Some bold text");
        assert_eq!(articles[0].url.as_deref(), Some("https://example.com/a"));
    }

    #[tokio::test]
    async fn test_fetch_drops_stale_and_untitled_items() {
        let server = MockServer::start();
        let items = format!(
            "{}{}{}",
            item("Fresh story", Utc::now()),
            item("Stale story", Utc::now() - Duration::days(10)),
            "<item><description>no title at all</description></item>"
        );
        let body = feed_xml(&items);
        server.mock(|when, then| {
            when.method(GET).path("/feed.xml");
            then.status(200).body(body);
        });

        let source = RssSource::new(server.url("/feed.xml"));
        let articles = source.fetch(&ContentRequest::default()).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Fresh story");
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_limit() {
        let server = MockServer::start();
        let items: String = (0..6).map(|i| item(&format!("Story {}", i), Utc::now())).collect();
        let body = feed_xml(&items);
        server.mock(|when, then| {
            when.method(GET).path("/feed.xml");
            then.status(200).body(body);
        });

        let source = RssSource::new(server.url("/feed.xml"));
        let request = ContentRequest {
            limit: 2,
            ..Default::default()
        };
        let articles = source.fetch(&request).await.unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rejects_garbage_feed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/feed.xml");
            then.status(200).body("this is not xml");
        });

        let source = RssSource::new(server.url("/feed.xml"));
        let err = source.fetch(&ContentRequest::default()).await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("plain text"), "plain text");
    }
}
