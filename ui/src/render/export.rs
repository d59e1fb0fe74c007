//! Handing a finished snapshot to the user: a file under the app's data dir on
//! desktop, a browser download on web.

use tracing::info;

use crate::core::error::ExportError;

use super::ImageBytes;

/// Delivers `image` as `<stem>-<timestamp>.png`. Returns the saved path on
/// desktop and `None` on web, where the browser owns the destination.
pub async fn deliver_snapshot(image: &ImageBytes, stem: &str) -> Result<Option<String>, ExportError> {
    let filename = snapshot_filename(stem);
    let delivered = download_bytes(&filename, "image/png", &image.bytes).await?;
    info!(
        filename = filename.as_str(),
        width = image.width,
        height = image.height,
        "snapshot delivered"
    );
    Ok(delivered)
}

pub fn snapshot_filename(stem: &str) -> String {
    let stem = stem.trim();
    let stem = if stem.is_empty() { "snapshot" } else { stem };
    format!("{stem}-{}.png", timestamp_slug())
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: &[u8],
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        let url = object_url(bytes, mime)?;
        let clicked = click_download(&url, filename);
        web_sys::Url::revoke_object_url(&url).ok();
        clicked.map(|()| None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = export_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_error(step: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> ExportError {
    move |_| ExportError::Unavailable(format!("browser refused to {step}"))
}

/// Wraps the PNG bytes in a Blob and returns an object URL the caller revokes.
#[cfg(target_arch = "wasm32")]
fn object_url(bytes: &[u8], mime: &str) -> Result<String, ExportError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser_error("build the image blob"))?;
    web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_error("create a blob URL"))
}

/// Clicks a detached, hidden `<a download>` pointing at `url`.
#[cfg(target_arch = "wasm32")]
fn click_download(url: &str, filename: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Unavailable("no document to attach the download to".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Unavailable("document has no body".into()))?;
    let link = document
        .create_element("a")
        .map_err(browser_error("create a download link"))?
        .unchecked_into::<web_sys::HtmlAnchorElement>();
    link.set_href(url);
    link.set_download(filename);
    link.style().set_property("display", "none").ok();

    body.append_child(&link).map_err(browser_error("attach the download link"))?;
    link.click();
    link.remove();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "RuntimeHeatmap", "RuntimeHeatmap")
        .ok_or_else(|| ExportError::Unavailable("Unable to determine export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_stem_and_timestamp() {
        let name = snapshot_filename("runtime-heatmap");
        assert!(name.starts_with("runtime-heatmap-"));
        assert!(name.ends_with(".png"));
        // "-YYYYMMDD_HHMMSS.png"
        assert_eq!(name.len(), "runtime-heatmap".len() + 1 + 15 + 4);
    }

    #[test]
    fn blank_stem_gets_a_name() {
        assert!(snapshot_filename("  ").starts_with("snapshot-"));
    }
}
