//! Pure domain types with minimal dependencies
//!
//! This module contains the stroke model shared by capture, rendering and
//! the session controller. Types here should have no rendering dependencies
//! (tiny-skia, image) so they can be serialized and tested in isolation.

pub mod stroke;
pub mod tool;

pub use stroke::*;
pub use tool::*;
