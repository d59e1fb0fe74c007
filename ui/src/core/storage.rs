//! Local persistence for the theme preference. The dataset itself is never
//! stored.

use tracing::warn;

use crate::chart::Theme;

const THEME_KEY: &str = "theme";

/// Saved theme, or dark when nothing (valid) was saved.
pub fn load_theme() -> Theme {
    read_setting(THEME_KEY)
        .and_then(|raw| Theme::parse(&raw))
        .unwrap_or_default()
}

pub fn save_theme(theme: Theme) {
    if let Err(err) = write_setting(THEME_KEY, theme.as_str()) {
        warn!(error = err.as_str(), "could not persist theme preference");
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn read_setting(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn write_setting(key: &str, value: &str) -> Result<(), String> {
    local_storage()
        .ok_or("localStorage unavailable")?
        .set_item(key, value)
        .map_err(|_| "localStorage write rejected".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "RuntimeHeatmap", "RuntimeHeatmap")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_setting(key: &str) -> Option<String> {
    let path = settings_dir()?.join(key);
    std::fs::read_to_string(path)
        .ok()
        .map(|raw| raw.trim().to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn write_setting(key: &str, value: &str) -> Result<(), String> {
    let dir = settings_dir().ok_or("Unable to determine settings directory")?;
    std::fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
    std::fs::write(dir.join(key), value).map_err(|err| err.to_string())
}
