//! Dioxus components shared by the desktop and web launchers.

mod controls;
mod dashboard;
mod heatmap;
mod legend;
mod theme_toggle;

pub use controls::Controls;
pub use dashboard::Dashboard;
pub use heatmap::HeatmapPanel;
pub use legend::LegendBar;
pub use theme_toggle::ThemeToggle;
