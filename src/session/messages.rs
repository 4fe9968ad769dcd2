//! Message types for annotation sessions
//!
//! This module contains:
//! - SessionMsg enum with nested sub-enums for organized message handling
//! - Convenience constructors used by host toolkits

use crate::capture::image::ImageSource;
use crate::capture::input::PointerEvent;
use crate::domain::{StrokeLog, ToolKind};

// ============================================================================
// Tool Types
// ============================================================================

/// Tool selection messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMsg {
    /// Select a specific tool
    Select(ToolKind),
    /// Cycle to the next tool
    Cycle,
}

// ============================================================================
// Session Messages
// ============================================================================

/// Everything the host application can ask of the annotation controller
#[derive(Debug, Clone)]
pub enum SessionMsg {
    /// Open an image for annotation, optionally restoring saved strokes
    Open {
        image: ImageSource,
        strokes: Option<StrokeLog>,
    },
    /// Pointer or touch input on the canvas
    Pointer(PointerEvent),
    /// Tool selection
    Tool(ToolMsg),
    /// Remove the most recent stroke
    Undo,
    /// Flatten and return the result with the stroke log
    Save,
    /// Discard the session
    Close,
}

impl SessionMsg {
    pub fn open(image: impl Into<ImageSource>) -> Self {
        Self::Open {
            image: image.into(),
            strokes: None,
        }
    }
    pub fn resume(image: impl Into<ImageSource>, strokes: StrokeLog) -> Self {
        Self::Open {
            image: image.into(),
            strokes: Some(strokes),
        }
    }

    // Pointer shortcuts
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Down(x, y))
    }
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Move(x, y))
    }
    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Up(x, y))
    }
    pub fn pointer_leave(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Leave(x, y))
    }
    pub fn pointer_cancel(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Cancel(x, y))
    }

    // Tool shortcuts
    pub fn select_tool(tool: ToolKind) -> Self {
        Self::Tool(ToolMsg::Select(tool))
    }
    pub fn cycle_tool() -> Self {
        Self::Tool(ToolMsg::Cycle)
    }
}
