//! Declarative, renderer-agnostic chart description.
//!
//! `ChartSpec` serializes (camelCase) to a document shaped like a heatmap
//! chart option: categorical axes, a cell series with progressive hints, a
//! piecewise visual map, data-zoom controls, a toolbox and tooltip styling.
//! The category lookup behind [`ChartSpec::tooltip`] stays on the Rust side.

use std::sync::Arc;

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::core::dataset::{CategoryLookup, SourceValue};

use super::legend::LegendPiece;
use super::theme::{Palette, Theme};
use super::tooltip::Tooltip;
use super::zoom::{self, Axis, ZoomState, ZoomWindow};

pub const SERIES_NAME: &str = "Runtime heatmap";

/// `(time_index, date_index, value)`; serializes as a three-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub time_index: usize,
    pub date_index: usize,
    pub value: SourceValue,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.time_index)?;
        tuple.serialize_element(&self.date_index)?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub theme: Theme,
    pub palette: Palette,
    pub animation: Animation,
    pub grid: Grid,
    pub x_axis: CategoryAxis,
    pub y_axis: CategoryAxis,
    #[serde(rename = "dataZoom", serialize_with = "zoom::serialize_controls")]
    pub zoom: ZoomState,
    pub toolbox: Toolbox,
    pub visual_map: VisualMap,
    pub series: HeatmapSeries,
    pub tooltip: TooltipStyle,
    #[serde(skip)]
    pub(crate) lookup: Arc<CategoryLookup>,
}

impl ChartSpec {
    /// Date labels (y axis), ascending.
    pub fn dates(&self) -> &[String] {
        &self.y_axis.data
    }

    /// Time-bucket labels (x axis), ascending.
    pub fn times(&self) -> &[String] {
        &self.x_axis.data
    }

    pub fn cells(&self) -> &[Cell] {
        &self.series.data
    }

    pub fn legend(&self) -> &[LegendPiece] {
        &self.visual_map.pieces
    }

    pub fn is_progressive(&self) -> bool {
        self.series.progressive.enabled
    }

    /// Hover content for `cell`. Never fails: unknown values and indices fall
    /// back to raw text.
    pub fn tooltip(&self, cell: Cell) -> Tooltip {
        Tooltip::resolve(self.dates(), self.times(), &self.lookup, cell)
    }

    /// Piece color for `value`, or the palette's out-of-range fill.
    pub fn color_for(&self, value: SourceValue) -> &str {
        self.visual_map
            .pieces
            .iter()
            .find(|piece| piece.value == value)
            .map(|piece| piece.color.as_str())
            .unwrap_or(self.palette.out_of_range)
    }

    pub fn zoom_window(&self, axis: Axis) -> ZoomWindow {
        self.zoom.window(axis)
    }

    /// Moves one axis window; the cells and axes stay as they are.
    pub fn set_zoom(&mut self, axis: Axis, window: ZoomWindow) {
        self.zoom.set(axis, window);
    }

    pub fn with_zoom(mut self, axis: Axis, window: ZoomWindow) -> Self {
        self.set_zoom(axis, window);
        self
    }

    /// Toolbox "restore": back to the full extent on both axes.
    pub fn restore_view(&mut self) {
        self.zoom.reset();
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub enabled: bool,
    pub duration_ms: u32,
    pub easing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub height: &'static str,
    pub top: &'static str,
    pub bottom: &'static str,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            height: "80%",
            top: "7%",
            bottom: "50%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<String>,
    pub split_area: SplitArea,
    pub axis_label: AxisLabel,
}

impl CategoryAxis {
    pub fn new(data: Vec<String>, axis_label: AxisLabel, palette: &Palette) -> Self {
        Self {
            kind: "category",
            data,
            split_area: SplitArea {
                show: true,
                colors: palette.split_area,
            },
            axis_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitArea {
    pub show: bool,
    pub colors: [&'static str; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u16>,
    pub interval: &'static str,
    pub font_size: u16,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolboxAction {
    SaveAsImage,
    Restore,
    DataZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolboxFeature {
    pub action: ToolboxAction,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolbox {
    pub show: bool,
    pub features: Vec<ToolboxFeature>,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self {
            show: true,
            features: vec![
                ToolboxFeature {
                    action: ToolboxAction::SaveAsImage,
                    title: "Save",
                },
                ToolboxFeature {
                    action: ToolboxAction::Restore,
                    title: "Restore",
                },
                ToolboxFeature {
                    action: ToolboxAction::DataZoom,
                    title: "Zoom",
                },
            ],
        }
    }
}

/// Value → color mapping. The built-in legend is hidden; the shell draws its
/// own toggleable legend from metadata order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualMap {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub show: bool,
    pub pieces: Vec<LegendPiece>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progressive {
    pub enabled: bool,
    pub chunk_size: usize,
    pub threshold: usize,
}

impl Progressive {
    /// Chunked rendering kicks in strictly above `threshold` cells.
    pub fn for_cell_count(count: usize, threshold: usize, chunk_size: usize) -> Self {
        Self {
            enabled: count > threshold,
            chunk_size: chunk_size.max(1),
            threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emphasis {
    pub border_color: &'static str,
    pub border_width: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSeries {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<Cell>,
    pub progressive: Progressive,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub position: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
}
