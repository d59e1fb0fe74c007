//! Error types for the shell operations around the pipeline. The pipeline
//! itself (`matrix::build`, `chart::assemble`) cannot fail.

use thiserror::Error;

/// Loading the runtime payload failed. Surfaced to the user with a retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read runtime data: {0}")]
    Io(#[from] std::io::Error),

    #[error("runtime data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Fetch(String),
}

/// Producing or delivering a chart snapshot failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("chart markup could not be parsed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("could not save snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unavailable(String),
}
