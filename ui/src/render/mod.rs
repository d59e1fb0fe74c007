//! Drawing a [`ChartSpec`] and capturing it as an image.

pub mod export;
pub mod raster;
pub mod svg;

use crate::chart::ChartSpec;
use crate::core::error::ExportError;

pub use export::deliver_snapshot;
pub use svg::SvgRenderer;

/// Encoded PNG plus its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Anything that can draw a chart description. Rendering always uses the
/// chart's current theme and zoom windows.
pub trait ChartRenderer {
    fn render_svg(&self, spec: &ChartSpec) -> String;

    fn request_snapshot(&self, spec: &ChartSpec) -> Result<ImageBytes, ExportError>;
}
