//! Annotation session management module
//!
//! This module contains:
//! - Session state and the message-driven controller
//! - Message types for session interactions

pub mod messages;
pub mod state;

pub use messages::{SessionMsg, ToolMsg};
pub use state::{AnnotationSession, Annotator, SaveResult};
