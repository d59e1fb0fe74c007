//! Light/dark color tokens carried by a [`ChartSpec`](super::ChartSpec). A
//! theme only changes these tokens, never the cells or axes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Body class the stylesheet keys its variables on.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Light => "light-mode",
            Self::Dark => "dark-mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub axis_label: &'static str,
    pub axis_line: &'static str,
    pub split_area: [&'static str; 2],
    pub cell_border: &'static str,
    pub emphasis_border: &'static str,
    pub tooltip_background: &'static str,
    pub tooltip_text: &'static str,
    /// Fill for values no legend piece covers.
    pub out_of_range: &'static str,
    pub slider_fill: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#ffffff",
    text: "#1f2933",
    axis_label: "#3e4c59",
    axis_line: "#9aa5b1",
    split_area: ["rgba(250,250,250,0.3)", "rgba(200,200,200,0.3)"],
    cell_border: "#ffffff",
    emphasis_border: "#000000",
    tooltip_background: "rgba(255,255,255,0.96)",
    tooltip_text: "#1f2933",
    out_of_range: "#d9dee4",
    slider_fill: "rgba(37,99,235,0.2)",
};

const DARK: Palette = Palette {
    background: "#0f1116",
    text: "#f5f7fb",
    axis_label: "#c1c7d0",
    axis_line: "#4a5565",
    split_area: ["rgba(255,255,255,0.03)", "rgba(255,255,255,0.06)"],
    cell_border: "#0f1116",
    emphasis_border: "#ffffff",
    tooltip_background: "rgba(21,25,35,0.95)",
    tooltip_text: "#f5f7fb",
    out_of_range: "#2a303c",
    slider_fill: "rgba(92,176,255,0.25)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark_and_round_trips_names() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn palettes_differ_in_emphasis() {
        assert_ne!(
            Theme::Light.palette().emphasis_border,
            Theme::Dark.palette().emphasis_border
        );
    }
}
