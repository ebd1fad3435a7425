pub mod logging;
pub mod sources;

pub use logging::{init_logging, Logger};
pub use sources::{GeneratedSource, RssSource, SourceManager};

pub mod prelude {
    pub use super::sources::SourceManager;
    pub use h2h_core::{Article, ContentRequest, ContentSource, Error, Result};
}
