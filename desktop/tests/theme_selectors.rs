#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Every class the shared Dioxus views emit must have a rule in the shared theme
(`ui/assets/theme/main.css`). A plain substring check is enough to catch a
rename on one side that the other side missed.

When a view gains structural markup that relies on CSS, add its selector to
REQUIRED_SELECTORS.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Layout
    ":root",
    ".app {",
    ".header {",
    ".footer {",
    // Controls
    ".controls {",
    ".date-label {",
    ".date-input {",
    ".live-toggle.live-on",
    ".live-toggle.live-off",
    ".theme-toggle {",
    // States
    ".error-banner {",
    ".retry-btn {",
    ".loading-state {",
    // Legend
    ".heatmap-legend {",
    ".legend-container {",
    ".legend-item {",
    ".legend-item.disabled",
    ".legend-swatch {",
    ".legend-label {",
    // Chart
    ".heatmap-area {",
    ".heatmap-panel {",
    ".heatmap-toolbox {",
    ".heatmap-zoom-controls {",
    ".heatmap-canvas {",
    ".export-status--success",
    ".export-status--error",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn theme_keeps_view_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|selector| !THEME_CSS.contains(selector))
        .collect();
    assert!(
        missing.is_empty(),
        "Shared theme is missing selectors used by the views: {missing:?}"
    );
}
