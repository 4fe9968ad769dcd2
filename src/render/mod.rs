//! Stroke rendering module
//!
//! This module contains:
//! - Tool constants and curve smoothing shared by all tools
//! - Image compositing using tiny-skia (for previews and flattening)

pub mod geometry;
pub mod image;

pub use self::image::{flatten, flatten_to_data_url, render};
