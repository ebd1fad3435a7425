use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use h2h_core::{Article, ContentRequest, Platform, PostSpec, Tone};
use h2h_inference::{create_models, prompts, Composer, Config, ModelSet};
use h2h_render::CardStyle;
use h2h_sources::{init_logging, SourceManager};
use h2h_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn headlines into platform-ready social content", long_about = None)]
struct Cli {
    /// Model backend. Available backends: openai (default), dummy
    #[arg(long, default_value = "openai", env = "H2H_MODEL")]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    #[arg(long, default_value = "us")]
    country: String,

    #[arg(long, default_value = "general")]
    category: String,

    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Content family: news, quotes or ai-topics
    #[arg(long, default_value = "news")]
    kind: String,

    /// RSS feed URL; when set, acquisition skips the model entirely
    #[arg(long, env = "H2H_FEED")]
    feed: Option<String>,
}

impl FetchArgs {
    fn to_request(&self) -> anyhow::Result<ContentRequest> {
        Ok(ContentRequest {
            kind: self.kind.parse()?,
            country: self.country.clone(),
            category: self.category.clone(),
            limit: self.limit,
            feed: self.feed.clone(),
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value_t = 5001, env = "PORT")]
        port: u16,

        /// TTF font used by the render-card endpoint
        #[arg(long, env = "H2H_CARD_FONT")]
        font: Option<PathBuf>,
    },
    /// Fetch and print articles
    Fetch {
        #[command(flatten)]
        args: FetchArgs,
    },
    /// Generate one social post from the first fetched article
    Post {
        #[command(flatten)]
        args: FetchArgs,

        #[arg(long, default_value = "twitter")]
        platform: String,

        #[arg(long, default_value = "informative")]
        tone: String,

        #[arg(long)]
        no_hashtags: bool,

        #[arg(long)]
        no_link: bool,

        /// Custom angle for the post
        #[arg(long, default_value = "")]
        angle: String,
    },
    /// Generate a themed series over the fetched articles
    Series {
        #[command(flatten)]
        args: FetchArgs,

        #[arg(long, default_value = "twitter")]
        platform: String,

        #[arg(long, default_value = "daily roundup")]
        theme: String,

        #[arg(long, default_value = "informative")]
        tone: String,
    },
    /// Sentiment and strategy analysis over the fetched articles
    Analyze {
        #[command(flatten)]
        args: FetchArgs,
    },
    /// Generate art for the first fetched article and write a share card
    Card {
        #[command(flatten)]
        args: FetchArgs,

        #[arg(long, default_value = "card.png")]
        out: PathBuf,

        /// TTF font for the caption
        #[arg(long, env = "H2H_CARD_FONT")]
        font: PathBuf,

        #[arg(long, default_value = "1024x1024")]
        size: String,
    },
}

async fn fetch_articles(sources: &SourceManager, args: &FetchArgs) -> anyhow::Result<Vec<Article>> {
    let request = args.to_request()?;
    let articles = sources.acquire(&request).await?;
    Ok(articles)
}

fn first_article(articles: &[Article]) -> anyhow::Result<&Article> {
    articles.first().ok_or_else(|| anyhow!("no articles acquired"))
}

fn print_articles(articles: &[Article]) {
    for article in articles {
        println!("📰 {} ({}, {})", article.title, article.source, article.published_at);
        if !article.description.is_empty() {
            println!("   {}", article.description);
        }
        if let Some(url) = &article.url {
            println!("   {}", url);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let ModelSet { news, content, image } = create_models(&cli.model, Config::from_env())?;
    let sources = SourceManager::new(news);
    let composer = Composer::new(content);

    match cli.command {
        Commands::Serve { port, font } => {
            let state = AppState {
                sources,
                composer,
                image_model: image,
                card_font: font,
            };
            let app = create_app(state).await;
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            info!("🚀 Headlines to Hashtags API running on http://localhost:{}", port);
            info!("✅ Health check: http://localhost:{}/api/health", port);
            axum::serve(listener, app).await?;
        }
        Commands::Fetch { args } => {
            let articles = fetch_articles(&sources, &args).await?;
            println!("Found {} articles", articles.len());
            print_articles(&articles);
        }
        Commands::Post {
            args,
            platform,
            tone,
            no_hashtags,
            no_link,
            angle,
        } => {
            let articles = fetch_articles(&sources, &args).await?;
            let article = first_article(&articles)?;
            let spec = PostSpec {
                platform: Platform::parse_lenient(&platform),
                tone: Tone::parse_lenient(&tone),
                include_hashtags: !no_hashtags,
                include_link: !no_link,
                custom_angle: angle,
            };
            let content = composer.create_post(article, &spec).await?;
            println!("{}", content);
        }
        Commands::Series {
            args,
            platform,
            theme,
            tone,
        } => {
            let articles = fetch_articles(&sources, &args).await?;
            let series = composer
                .create_series(
                    &articles,
                    Platform::parse_lenient(&platform),
                    &theme,
                    Tone::parse_lenient(&tone),
                )
                .await?;
            println!("{}", series);
        }
        Commands::Analyze { args } => {
            let articles = fetch_articles(&sources, &args).await?;
            let analysis = composer.analyze(&articles).await?;
            println!("{}", analysis);
        }
        Commands::Card {
            args,
            out,
            font,
            size,
        } => {
            let articles = fetch_articles(&sources, &args).await?;
            let article = first_article(&articles)?;
            let image_model = image.ok_or_else(|| anyhow!("backend has no image model"))?;

            let prompt = prompts::image_prompt(article);
            info!("🎨 generating art for: {}", article.title);
            let data = image_model.generate_image(&prompt, &size).await?;
            let bytes = h2h_render::resolve_image(&data).await?;

            let font = h2h_render::load_font(&font)
                .with_context(|| format!("loading font {}", font.display()))?;
            let png = h2h_render::render_card(&bytes, &article.title, &font, &CardStyle::default())?;
            std::fs::write(&out, png)?;
            println!("💾 wrote {}", out.display());
        }
    }

    Ok(())
}
