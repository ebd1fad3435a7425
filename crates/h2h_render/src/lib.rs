pub mod card;
pub mod text;

pub use card::{load_font, render_card, resolve_image, CardStyle};
pub use text::wrap_caption;
