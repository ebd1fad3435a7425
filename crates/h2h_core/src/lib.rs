pub mod error;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::{ContentSource, ImageModel, TextModel};
pub use types::{
    Article, ContentKind, ContentRequest, GenerationParams, ImageData, Platform, PostSpec, Tone,
};

pub type Result<T> = std::result::Result<T, Error>;
