//! SVG → PNG through usvg/resvg. Pure Rust, so the same path runs on desktop
//! and in the browser.

use std::sync::Arc;

use tiny_skia::{Pixmap, Transform};
use tracing::debug;

use crate::core::error::ExportError;

use super::ImageBytes;

/// Rasterizes `svg` at `pixel_ratio` device pixels per CSS pixel. A ratio that
/// is not a positive number falls back to 1.
pub fn rasterize(svg: &str, pixel_ratio: f32) -> Result<ImageBytes, ExportError> {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };

    let mut options = usvg::Options::default();
    options.fontdb = Arc::new(font_database());
    let tree = usvg::Tree::from_str(svg, &options)?;
    let size = tree.size();
    let width = (size.width() * ratio).ceil() as u32;
    let height = (size.height() * ratio).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| ExportError::Raster(format!("invalid canvas size {width}x{height}")))?;

    resvg::render(&tree, Transform::from_scale(ratio, ratio), &mut pixmap.as_mut());
    debug!(width, height, "chart rasterized");

    let bytes = encode_png(&pixmap)?;
    Ok(ImageBytes {
        bytes,
        width,
        height,
    })
}

/// System fonts on desktop. The browser build has none to load, so text
/// nodes are skipped there.
fn font_database() -> usvg::fontdb::Database {
    #[allow(unused_mut)]
    let mut fonts = usvg::fontdb::Database::new();
    #[cfg(not(target_arch = "wasm32"))]
    fonts.load_system_fonts();
    fonts
}

fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.write_header()?.write_image_data(&rgba)?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"4\">\
                          <rect width=\"10\" height=\"4\" fill=\"#ff0000\"/></svg>";

    #[test]
    fn scales_by_pixel_ratio() {
        let image = rasterize(SQUARE, 3.0).unwrap();
        assert_eq!((image.width, image.height), (30, 12));
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        let image = rasterize(SQUARE, f32::NAN).unwrap();
        assert_eq!((image.width, image.height), (10, 4));
        let image = rasterize(SQUARE, -2.0).unwrap();
        assert_eq!(image.width, 10);
    }

    #[test]
    fn malformed_markup_is_an_svg_error() {
        assert!(matches!(rasterize("<svg", 1.0), Err(ExportError::Svg(_))));
    }
}
