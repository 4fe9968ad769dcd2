//! Freehand annotation over a fixed raster image
//!
//! A session captures pen, highlighter and eraser strokes from pointer
//! events, keeps them in an undo-only stroke log, and flattens them onto the
//! base image on save. The stroke log is returned alongside the flattened PNG
//! so editing can resume later against the original image.

mod annotations;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;

pub use capture::image::{BaseImage, ImageSource};
pub use capture::input::{CaptureOutcome, CaptureState, PointerEvent};
pub use config::{BlendKind, InkConfig, StrokeColor, ToolPolicy, ToolStyle};
pub use domain::{Point, Stroke, StrokeLog, ToolKind};
pub use error::{ImageLoadError, InkError, RenderError, StrokeLogError};
pub use session::{AnnotationSession, Annotator, SaveResult, SessionMsg, ToolMsg};
