//! Error types for image loading, rendering and stroke log parsing

use thiserror::Error;

/// The base image could not be decoded; no session is created
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("image data is empty")]
    Empty,
    #[error("malformed data URL: {0}")]
    DataUrl(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Compositing or encoding the flattened raster failed
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// A saved stroke log could not be parsed
#[derive(Debug, Error)]
pub enum StrokeLogError {
    #[error("unknown tool {0:?}")]
    UnknownTool(String),
    #[error("invalid stroke log JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure surfaced by the annotation controller
#[derive(Debug, Error)]
pub enum InkError {
    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
