//! Input capture and base image handling
//!
//! This module consolidates:
//! - Pointer event capture state machine (input.rs)
//! - Base image type and decoding (image.rs)
//! - `data:` URL encoding used by the host application (data_url.rs)

pub mod data_url;
pub mod image;
pub mod input;
