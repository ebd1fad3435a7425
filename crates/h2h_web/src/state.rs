use std::path::PathBuf;
use std::sync::Arc;

use h2h_core::ImageModel;
use h2h_inference::Composer;
use h2h_sources::SourceManager;

pub struct AppState {
    pub sources: SourceManager,
    pub composer: Composer,
    pub image_model: Option<Arc<dyn ImageModel>>,
    pub card_font: Option<PathBuf>,
}
