//! Dense matrix + metadata + filters → [`ChartSpec`].

use std::sync::Arc;

use crate::core::config::{
    HeatmapConfig, ANIMATION_DURATION_MS, PROGRESSIVE_CHUNK_SIZE, PROGRESSIVE_RENDER_THRESHOLD,
};
use crate::core::dataset::CategoryMetadata;
use crate::core::matrix::DenseMatrix;
use crate::core::visibility::VisibilitySet;

use super::legend::legend_pieces;
use super::spec::{
    Animation, AxisLabel, CategoryAxis, Cell, ChartSpec, Emphasis, Grid, HeatmapSeries,
    Progressive, Toolbox, TooltipStyle, VisualMap, SERIES_NAME,
};
use super::theme::Theme;
use super::zoom::ZoomState;

/// Presentation parameters. Only `theme` varies at runtime; the rest come from
/// [`HeatmapConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub theme: Theme,
    pub progressive_threshold: usize,
    pub progressive_chunk_size: usize,
    pub animation_duration_ms: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            progressive_threshold: PROGRESSIVE_RENDER_THRESHOLD,
            progressive_chunk_size: PROGRESSIVE_CHUNK_SIZE,
            animation_duration_ms: ANIMATION_DURATION_MS,
        }
    }
}

impl ChartOptions {
    pub fn from_config(config: &HeatmapConfig, theme: Theme) -> Self {
        Self {
            theme,
            progressive_threshold: config.progressive_threshold,
            progressive_chunk_size: config.progressive_chunk_size,
            animation_duration_ms: config.animation_duration_ms,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Non-empty cells in row-major order, minus values outside a non-empty
/// `visible` set.
pub fn flatten_cells(matrix: &DenseMatrix, visible: Option<&VisibilitySet>) -> Vec<Cell> {
    let filter = visible.filter(|set| !set.is_empty());
    let mut cells = Vec::new();
    for (date_index, row) in matrix.matrix.iter().enumerate() {
        for (time_index, value) in row.iter().enumerate() {
            let Some(value) = *value else {
                continue;
            };
            if filter.is_some_and(|set| !set.contains(value)) {
                continue;
            }
            cells.push(Cell {
                time_index,
                date_index,
                value,
            });
        }
    }
    cells
}

/// Builds the chart description. `visible` is read during this call only.
pub fn assemble(
    matrix: &DenseMatrix,
    meta: &CategoryMetadata,
    visible: Option<&VisibilitySet>,
    options: &ChartOptions,
) -> ChartSpec {
    let palette = options.theme.palette();
    let lookup = meta.lookup();
    let cells = flatten_cells(matrix, visible);
    let pieces = legend_pieces(&lookup);
    let progressive = Progressive::for_cell_count(
        cells.len(),
        options.progressive_threshold,
        options.progressive_chunk_size,
    );

    ChartSpec {
        theme: options.theme,
        palette,
        animation: Animation {
            enabled: true,
            duration_ms: options.animation_duration_ms,
            easing: "cubicOut",
        },
        grid: Grid::default(),
        x_axis: CategoryAxis::new(
            matrix.times.clone(),
            AxisLabel {
                rotate: Some(45),
                interval: "auto",
                font_size: 11,
                color: palette.axis_label,
            },
            &palette,
        ),
        y_axis: CategoryAxis::new(
            matrix.dates.clone(),
            AxisLabel {
                rotate: None,
                interval: "auto",
                font_size: 11,
                color: palette.axis_label,
            },
            &palette,
        ),
        zoom: ZoomState::default(),
        toolbox: Toolbox::default(),
        visual_map: VisualMap {
            kind: "piecewise",
            show: false,
            pieces,
        },
        series: HeatmapSeries {
            name: SERIES_NAME,
            kind: "heatmap",
            data: cells,
            progressive,
            emphasis: Emphasis {
                border_color: palette.emphasis_border,
                border_width: 1,
            },
        },
        tooltip: TooltipStyle {
            position: "top",
            background_color: palette.tooltip_background,
            text_color: palette.tooltip_text,
        },
        lookup: Arc::new(lookup),
    }
}
