//! Static SVG drawing of a [`ChartSpec`].
//!
//! Layout follows the chart grid: the plot starts 7 % from the top and spans
//! 80 % of the height, the x slider sits at 95 % and the vertical y slider at
//! 92 % of the width. `dates[0]` is the top row. Only categories inside the
//! current zoom windows are drawn.

use std::ops::Range;

use crate::chart::spec::Cell;
use crate::chart::tooltip::escape_markup;
use crate::chart::{Axis, ChartSpec, ZoomWindow};
use crate::core::config::{HeatmapConfig, CHART_HEIGHT_PX, CHART_WIDTH_PX, SNAPSHOT_PIXEL_RATIO};
use crate::core::error::ExportError;

use super::{raster, ChartRenderer, ImageBytes};

const LABEL_GUTTER: f64 = 96.0;
const SLIDER_THICKNESS: f64 = 12.0;
const MIN_ROW_LABEL_PX: f64 = 14.0;
const MIN_COLUMN_LABEL_PX: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(CHART_WIDTH_PX, CHART_HEIGHT_PX)
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: SNAPSHOT_PIXEL_RATIO,
        }
    }

    pub fn from_config(config: &HeatmapConfig) -> Self {
        Self::new(config.chart_width_px, config.chart_height_px)
            .with_pixel_ratio(config.snapshot_pixel_ratio)
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    fn plot(&self) -> Plot {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let left = LABEL_GUTTER.min(width * 0.25);
        let right = (width * 0.90).max(left + 1.0);
        let top = height * 0.07;
        Plot {
            left,
            top,
            width: right - left,
            height: height * 0.80,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl ChartRenderer for SvgRenderer {
    fn render_svg(&self, spec: &ChartSpec) -> String {
        let palette = spec.palette;
        let plot = self.plot();
        let columns = spec.zoom_window(Axis::X).index_range(spec.times().len());
        let rows = spec.zoom_window(Axis::Y).index_range(spec.dates().len());
        let cell_w = plot.width / columns.len().max(1) as f64;
        let cell_h = plot.height / rows.len().max(1) as f64;

        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
            w = self.width,
            h = self.height,
        );
        out.push_str(&format!(
            "<rect class=\"heatmap-background\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            self.width, self.height, palette.background
        ));

        for (offset, date_index) in rows.clone().enumerate() {
            out.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
                plot.left,
                plot.top + offset as f64 * cell_h,
                plot.width,
                cell_h,
                palette.split_area[date_index % 2],
            ));
        }

        let visible: Vec<Cell> = spec
            .cells()
            .iter()
            .copied()
            .filter(|cell| columns.contains(&cell.time_index) && rows.contains(&cell.date_index))
            .collect();

        let chunk_size = if spec.is_progressive() {
            spec.series.progressive.chunk_size.max(1)
        } else {
            visible.len().max(1)
        };
        for (index, chunk) in visible.chunks(chunk_size).enumerate() {
            out.push_str(&format!(
                "<g class=\"heatmap-chunk\" data-chunk=\"{index}\" stroke=\"{}\" stroke-width=\"0.5\">\n",
                palette.cell_border
            ));
            for cell in chunk {
                let x = plot.left + (cell.time_index - columns.start) as f64 * cell_w;
                let y = plot.top + (cell.date_index - rows.start) as f64 * cell_h;
                out.push_str(&format!(
                    "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{cell_w:.2}\" height=\"{cell_h:.2}\" \
                     fill=\"{}\"><title>{}</title></rect>\n",
                    escape_markup(spec.color_for(cell.value)),
                    escape_markup(&spec.tooltip(*cell).to_text()),
                ));
            }
            out.push_str("</g>\n");
        }

        out.push_str(&format!(
            "<path d=\"M{l:.2} {t:.2} V{b:.2} H{r:.2}\" fill=\"none\" stroke=\"{}\"/>\n",
            palette.axis_line,
            l = plot.left,
            t = plot.top,
            b = plot.bottom(),
            r = plot.left + plot.width,
        ));

        let row_label = &spec.y_axis.axis_label;
        let row_step = label_step(rows.len(), cell_h, MIN_ROW_LABEL_PX);
        for (offset, date_index) in rows.clone().enumerate().step_by(row_step) {
            out.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" dominant-baseline=\"middle\" \
                 font-size=\"{}\" fill=\"{}\">{}</text>\n",
                plot.left - 8.0,
                plot.top + (offset as f64 + 0.5) * cell_h,
                row_label.font_size,
                row_label.color,
                escape_markup(&spec.dates()[date_index]),
            ));
        }

        let column_label = &spec.x_axis.axis_label;
        let column_step = label_step(columns.len(), cell_w, MIN_COLUMN_LABEL_PX);
        let rotate = column_label.rotate.unwrap_or(0);
        for (offset, time_index) in columns.clone().enumerate().step_by(column_step) {
            let x = plot.left + (offset as f64 + 0.5) * cell_w;
            let y = plot.bottom() + 14.0;
            out.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"end\" font-size=\"{}\" fill=\"{}\" \
                 transform=\"rotate(-{rotate} {x:.2} {y:.2})\">{}</text>\n",
                column_label.font_size,
                column_label.color,
                escape_markup(&spec.times()[time_index]),
            ));
        }

        self.push_sliders(&mut out, spec, &plot);
        out.push_str("</svg>\n");
        out
    }

    fn request_snapshot(&self, spec: &ChartSpec) -> Result<ImageBytes, ExportError> {
        raster::rasterize(&self.render_svg(spec), self.pixel_ratio)
    }
}

impl SvgRenderer {
    fn push_sliders(&self, out: &mut String, spec: &ChartSpec, plot: &Plot) {
        let palette = spec.palette;
        let x_track_top = f64::from(self.height) * 0.95;
        let y_track_left = f64::from(self.width) * 0.92;

        let x_span = span(spec.zoom_window(Axis::X), plot.left, plot.width);
        let y_span = span(spec.zoom_window(Axis::Y), plot.top, plot.height);

        out.push_str(&format!(
            "<g class=\"heatmap-zoom\" fill=\"{}\">\n\
             <rect x=\"{:.2}\" y=\"{x_track_top:.2}\" width=\"{:.2}\" height=\"{SLIDER_THICKNESS}\" opacity=\"0.25\"/>\n\
             <rect x=\"{:.2}\" y=\"{x_track_top:.2}\" width=\"{:.2}\" height=\"{SLIDER_THICKNESS}\" opacity=\"0.6\"/>\n\
             <rect x=\"{y_track_left:.2}\" y=\"{:.2}\" width=\"{SLIDER_THICKNESS}\" height=\"{:.2}\" opacity=\"0.25\"/>\n\
             <rect x=\"{y_track_left:.2}\" y=\"{:.2}\" width=\"{SLIDER_THICKNESS}\" height=\"{:.2}\" opacity=\"0.6\"/>\n\
             </g>\n",
            palette.slider_fill,
            plot.left,
            plot.width,
            x_span.start,
            x_span.end - x_span.start,
            plot.top,
            plot.height,
            y_span.start,
            y_span.end - y_span.start,
        ));
    }
}

/// Pixel extent of a zoom window along a track.
fn span(window: ZoomWindow, origin: f64, length: f64) -> Range<f64> {
    origin + length * window.start / 100.0..origin + length * window.end / 100.0
}

/// Label every `n`th category so labels keep at least `min_px` apart.
fn label_step(count: usize, band_px: f64, min_px: f64) -> usize {
    if count == 0 || band_px >= min_px || band_px <= 0.0 {
        return 1;
    }
    (min_px / band_px).ceil() as usize
}
