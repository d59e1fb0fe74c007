//! Per-axis pan/zoom windows, expressed as percentages of the axis extent.

use std::ops::Range;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomWindow {
    pub start: f64,
    pub end: f64,
}

impl ZoomWindow {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 100.0,
    };

    /// Clamps both ends into 0–100 and orders them. Non-finite input falls
    /// back to the full extent on that side.
    pub fn clamped(start: f64, end: f64) -> Self {
        let start = if start.is_finite() { start.clamp(0.0, 100.0) } else { 0.0 };
        let end = if end.is_finite() { end.clamp(0.0, 100.0) } else { 100.0 };
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Category indices covered by the window on an axis of `len` entries.
    /// A non-empty axis always shows at least one category.
    pub fn index_range(&self, len: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }
        let first = ((self.start / 100.0) * len as f64).floor() as usize;
        let first = first.min(len - 1);
        let last = ((self.end / 100.0) * len as f64).ceil() as usize;
        let last = last.clamp(first + 1, len);
        first..last
    }
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ZoomState {
    pub x: ZoomWindow,
    pub y: ZoomWindow,
}

impl ZoomState {
    pub fn window(&self, axis: Axis) -> ZoomWindow {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, window: ZoomWindow) {
        match axis {
            Axis::X => self.x = window,
            Axis::Y => self.y = window,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Inline gesture zoom on both axes plus a slider handle for each.
    pub fn controls(&self) -> Vec<DataZoomControl> {
        vec![
            DataZoomControl::inside(Axis::X, self.x),
            DataZoomControl::inside(Axis::Y, self.y),
            DataZoomControl {
                top: Some("95%"),
                height: Some(12),
                ..DataZoomControl::slider(Axis::X, self.x)
            },
            DataZoomControl {
                left: Some("92%"),
                width: Some(12),
                orient: Some("vertical"),
                ..DataZoomControl::slider(Axis::Y, self.y)
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomKind {
    Inside,
    Slider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoomControl {
    #[serde(rename = "type")]
    pub kind: ZoomKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_index: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_index: Option<u8>,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<&'static str>,
}

impl DataZoomControl {
    fn base(kind: ZoomKind, axis: Axis, window: ZoomWindow) -> Self {
        let (x_axis_index, y_axis_index) = match axis {
            Axis::X => (Some(0), None),
            Axis::Y => (None, Some(0)),
        };
        Self {
            kind,
            x_axis_index,
            y_axis_index,
            start: window.start,
            end: window.end,
            top: None,
            left: None,
            height: None,
            width: None,
            orient: None,
        }
    }

    pub fn inside(axis: Axis, window: ZoomWindow) -> Self {
        Self::base(ZoomKind::Inside, axis, window)
    }

    pub fn slider(axis: Axis, window: ZoomWindow) -> Self {
        Self::base(ZoomKind::Slider, axis, window)
    }
}

pub(crate) fn serialize_controls<S: Serializer>(
    state: &ZoomState,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    state.controls().serialize(serializer)
}
