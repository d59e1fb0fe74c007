//! Shared crate for the runtime heatmap: the data pipeline, the chart
//! description built from it, rendering, and the Dioxus views both launchers
//! mount.

pub mod chart;
pub mod core;
pub mod render;
pub mod views;
