use std::io::Cursor;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use h2h_core::{Error, ImageData, Result};

use crate::text::wrap_caption;

/// Layout knobs for the share card.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub width: u32,
    pub padding: u32,
    pub scale: f32,
    pub line_height: u32,
    pub band_color: Rgba<u8>,
    pub text_color: Rgba<u8>,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            padding: 32,
            scale: 36.0,
            line_height: 44,
            band_color: Rgba([18, 18, 24, 255]),
            text_color: Rgba([240, 240, 240, 255]),
        }
    }
}

impl CardStyle {
    /// Caption budget per line, from the usable width and an estimated
    /// glyph advance of ~0.55em.
    pub fn max_chars_per_line(&self) -> usize {
        let usable = self.width.saturating_sub(self.padding * 2) as f32;
        (usable / (self.scale * 0.55)).max(1.0) as usize
    }
}

/// Turn a vendor image payload into raw bytes: decode base64 inline
/// data, or fetch a hosted URL.
pub async fn resolve_image(data: &ImageData) -> Result<Vec<u8>> {
    match data {
        ImageData::Base64(b64) => BASE64
            .decode(b64.trim())
            .map_err(|e| Error::Render(format!("Invalid base64 image: {}", e))),
        ImageData::Url(url) => {
            debug!(url, "fetching generated image");
            let response = reqwest::get(url).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
    }
}

pub fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|e| Error::Render(format!("Invalid font file: {}", e)))
}

fn scale_to_width(art: &DynamicImage, width: u32) -> DynamicImage {
    if art.width() == width {
        return art.clone();
    }
    let height = ((art.height() as u64 * width as u64) / art.width() as u64).max(1) as u32;
    art.resize_exact(width, height, imageops::FilterType::Lanczos3)
}

/// Composite the generated art with a caption band and encode PNG.
///
/// The band is sized from the wrapped line count, so captions never
/// overflow it.
pub fn render_card(
    image_bytes: &[u8],
    caption: &str,
    font: &FontVec,
    style: &CardStyle,
) -> Result<Vec<u8>> {
    let art = image::load_from_memory(image_bytes)
        .map_err(|e| Error::Render(format!("Failed to decode generated image: {}", e)))?;
    let art = scale_to_width(&art, style.width);
    let art_height = art.height();

    let lines = wrap_caption(caption, style.max_chars_per_line());
    let band_height = style.padding * 2 + style.line_height * lines.len().max(1) as u32;

    let mut canvas =
        RgbaImage::from_pixel(style.width, art_height + band_height, style.band_color);
    imageops::overlay(&mut canvas, &art.to_rgba8(), 0, 0);

    let scale = PxScale::from(style.scale);
    for (i, line) in lines.iter().enumerate() {
        let y = art_height + style.padding + i as u32 * style.line_height;
        draw_text_mut(
            &mut canvas,
            style.text_color,
            style.padding as i32,
            y as i32,
            scale,
            font,
            line,
        );
    }

    let mut out = Cursor::new(Vec::new());
    canvas
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Render(format!("Failed to encode card: {}", e)))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const TINY_PNG_B64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    #[tokio::test]
    async fn test_resolve_base64_image() {
        let bytes = resolve_image(&ImageData::Base64(TINY_PNG_B64.to_string()))
            .await
            .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1);
        assert_eq!(decoded.height(), 1);
    }

    #[tokio::test]
    async fn test_resolve_rejects_bad_base64() {
        let err = resolve_image(&ImageData::Base64("not base64!!!".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[tokio::test]
    async fn test_resolve_url_image() {
        let server = MockServer::start();
        let png = BASE64.decode(TINY_PNG_B64).unwrap();
        server.mock(|when, then| {
            when.method(GET).path("/art.png");
            then.status(200)
                .header("Content-Type", "image/png")
                .body(png.clone());
        });

        let bytes = resolve_image(&ImageData::Url(server.url("/art.png")))
            .await
            .unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn test_scale_to_width_preserves_aspect() {
        let art = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            200,
            100,
            Rgba([10, 20, 30, 255]),
        ));
        let scaled = scale_to_width(&art, 100);
        assert_eq!(scaled.width(), 100);
        assert_eq!(scaled.height(), 50);
    }

    #[test]
    fn test_caption_budget_is_positive() {
        let style = CardStyle::default();
        assert!(style.max_chars_per_line() >= 10);

        let narrow = CardStyle {
            width: 10,
            ..Default::default()
        };
        assert_eq!(narrow.max_chars_per_line(), 1);
    }
}
