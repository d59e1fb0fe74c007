//! Runtime constants for the heatmap shell, with environment overrides.
//!
//! Defaults mirror what the report has always shipped with (30 s polling, a
//! 700 px chart, progressive rendering past 10 000 cells in 5 000-cell
//! chunks). On native targets any field can be overridden through an
//! `RTHEATMAP_*` variable; values that fail to parse are ignored with a
//! warning.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const POLLING_INTERVAL_MS: u64 = 30_000;
pub const CHART_HEIGHT_PX: u32 = 700;
pub const CHART_WIDTH_PX: u32 = 1200;
pub const ANIMATION_DURATION_MS: u32 = 500;
pub const PROGRESSIVE_RENDER_THRESHOLD: usize = 10_000;
pub const PROGRESSIVE_CHUNK_SIZE: usize = 5_000;
pub const DATA_ENDPOINT: &str = "/runtime.json";
pub const DATA_PATH: &str = "runtime.json";
pub const EXPORT_FILE_STEM: &str = "runtime-heatmap";
pub const SNAPSHOT_PIXEL_RATIO: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub polling_interval_ms: u64,
    pub chart_height_px: u32,
    pub chart_width_px: u32,
    pub animation_duration_ms: u32,
    pub progressive_threshold: usize,
    pub progressive_chunk_size: usize,
    /// URL fetched by the web build.
    pub data_endpoint: String,
    /// File read by the desktop build.
    pub data_path: String,
    pub export_file_stem: String,
    pub snapshot_pixel_ratio: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: POLLING_INTERVAL_MS,
            chart_height_px: CHART_HEIGHT_PX,
            chart_width_px: CHART_WIDTH_PX,
            animation_duration_ms: ANIMATION_DURATION_MS,
            progressive_threshold: PROGRESSIVE_RENDER_THRESHOLD,
            progressive_chunk_size: PROGRESSIVE_CHUNK_SIZE,
            data_endpoint: DATA_ENDPOINT.to_string(),
            data_path: DATA_PATH.to_string(),
            export_file_stem: EXPORT_FILE_STEM.to_string(),
            snapshot_pixel_ratio: SNAPSHOT_PIXEL_RATIO,
        }
    }
}

impl HeatmapConfig {
    /// Defaults with `RTHEATMAP_*` overrides applied (native only; the web
    /// build has no process environment).
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::default().with_overrides(|key| std::env::var(key).ok())
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        override_parsed(&lookup, "RTHEATMAP_POLL_MS", &mut self.polling_interval_ms);
        override_parsed(&lookup, "RTHEATMAP_CHART_HEIGHT", &mut self.chart_height_px);
        override_parsed(&lookup, "RTHEATMAP_CHART_WIDTH", &mut self.chart_width_px);
        override_parsed(&lookup, "RTHEATMAP_ANIMATION_MS", &mut self.animation_duration_ms);
        override_parsed(
            &lookup,
            "RTHEATMAP_PROGRESSIVE_THRESHOLD",
            &mut self.progressive_threshold,
        );
        override_parsed(&lookup, "RTHEATMAP_CHUNK_SIZE", &mut self.progressive_chunk_size);
        override_parsed(&lookup, "RTHEATMAP_PIXEL_RATIO", &mut self.snapshot_pixel_ratio);

        if let Some(endpoint) = lookup("RTHEATMAP_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.data_endpoint = endpoint;
        }
        if let Some(path) = lookup("RTHEATMAP_DATA").filter(|v| !v.trim().is_empty()) {
            self.data_path = path;
        }
        if let Some(stem) = lookup("RTHEATMAP_EXPORT_STEM").filter(|v| !v.trim().is_empty()) {
            self.export_file_stem = stem;
        }

        if self.progressive_chunk_size == 0 {
            warn!("RTHEATMAP_CHUNK_SIZE must be positive; using default");
            self.progressive_chunk_size = PROGRESSIVE_CHUNK_SIZE;
        }
        if !(self.snapshot_pixel_ratio.is_finite() && self.snapshot_pixel_ratio > 0.0) {
            warn!("RTHEATMAP_PIXEL_RATIO must be positive; using default");
            self.snapshot_pixel_ratio = SNAPSHOT_PIXEL_RATIO;
        }
        self
    }
}

fn override_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = raw.as_str(), "ignoring unparseable config override"),
    }
}

static CONFIG: Lazy<HeatmapConfig> = Lazy::new(HeatmapConfig::from_env);

/// Process-wide configuration, resolved on first use.
pub fn current() -> &'static HeatmapConfig {
    &CONFIG
}
