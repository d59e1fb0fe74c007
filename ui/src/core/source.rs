//! Where the runtime payload comes from: a local file on desktop, the data
//! endpoint on web.

use tracing::info;

use super::config::HeatmapConfig;
use super::dataset::Payload;
use super::error::LoadError;

pub async fn load_payload(config: &HeatmapConfig) -> Result<Payload, LoadError> {
    let bytes = fetch_bytes(config).await?;
    let payload = Payload::from_slice(&bytes)?;
    info!(
        dates = payload.data.len(),
        sources = payload.meta.sources.len(),
        "runtime data loaded"
    );
    Ok(payload)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_bytes(config: &HeatmapConfig) -> Result<Vec<u8>, LoadError> {
    Ok(std::fs::read(&config.data_path)?)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(config: &HeatmapConfig) -> Result<Vec<u8>, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("window unavailable".into()))?;
    let response = JsFuture::from(window.fetch_with_str(&config.data_endpoint))
        .await
        .map_err(|_| LoadError::Fetch("network request failed".into()))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| LoadError::Fetch("unexpected fetch response".into()))?;

    if !response.ok() {
        return Err(LoadError::Fetch(format!(
            "HTTP error! status: {}",
            response.status()
        )));
    }

    let text = response
        .text()
        .map_err(|_| LoadError::Fetch("response body unavailable".into()))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|_| LoadError::Fetch("response body unreadable".into()))?;
    text.as_string()
        .map(String::into_bytes)
        .ok_or_else(|| LoadError::Fetch("response body is not text".into()))
}
