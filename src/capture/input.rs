//! Pointer capture state machine
//!
//! Two states, `Idle` and `Capturing`. A down event starts a new stroke with
//! the active tool, move events extend it, and up/leave/cancel return to idle
//! leaving the stroke as drawn.

use crate::domain::{Point, Stroke, StrokeLog, ToolKind};

/// Pointer or touch input in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed or touch started
    Down(f32, f32),
    /// Pointer or touch moved
    Move(f32, f32),
    /// Pointer released or touch ended
    Up(f32, f32),
    /// Pointer left the canvas
    Leave(f32, f32),
    /// Input was cancelled by the platform
    Cancel(f32, f32),
}

impl PointerEvent {
    /// Position carried by the event
    pub fn position(self) -> Point {
        match self {
            PointerEvent::Down(x, y)
            | PointerEvent::Move(x, y)
            | PointerEvent::Up(x, y)
            | PointerEvent::Leave(x, y)
            | PointerEvent::Cancel(x, y) => Point::new(x, y),
        }
    }
}

/// What a pointer event did to the stroke log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new stroke was appended
    Started,
    /// The active stroke received a point
    Extended,
    /// Capture ended; the stroke stays as drawn
    Finished,
    /// The event did not apply in the current state
    Ignored,
}

/// Active tool and whether a stroke is being captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureState {
    active_tool: ToolKind,
    capturing: bool,
}

impl CaptureState {
    pub fn new(active_tool: ToolKind) -> Self {
        Self {
            active_tool,
            capturing: false,
        }
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Apply a pointer event to `strokes`
    pub fn handle(&mut self, strokes: &mut StrokeLog, event: PointerEvent) -> CaptureOutcome {
        match event {
            PointerEvent::Down(x, y) => {
                if self.capturing {
                    // A missed up event; the previous stroke is already complete
                    log::debug!("Pointer down while capturing, starting a new stroke");
                }
                strokes.push(Stroke::starting_at(self.active_tool, Point::new(x, y)));
                self.capturing = true;
                log::debug!("Capture started with {} at ({x}, {y})", self.active_tool);
                CaptureOutcome::Started
            }
            PointerEvent::Move(x, y) => {
                if !self.capturing {
                    return CaptureOutcome::Ignored;
                }
                if strokes.extend_last(Point::new(x, y)) {
                    log::trace!("Point appended at ({x}, {y})");
                    CaptureOutcome::Extended
                } else {
                    // Nothing left to extend
                    self.capturing = false;
                    CaptureOutcome::Ignored
                }
            }
            PointerEvent::Up(..) | PointerEvent::Leave(..) | PointerEvent::Cancel(..) => {
                if !self.capturing {
                    return CaptureOutcome::Ignored;
                }
                self.capturing = false;
                log::debug!("Capture finished, {} strokes in log", strokes.len());
                CaptureOutcome::Finished
            }
        }
    }

    /// Select the tool for the next stroke
    ///
    /// Rejected while capturing; returns whether the tool was changed.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if self.capturing {
            log::debug!("Ignoring tool switch to {tool} during capture");
            return false;
        }
        self.active_tool = tool;
        true
    }

    /// End any capture in progress without touching the log
    pub fn cancel(&mut self) {
        self.capturing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_move_up_builds_one_stroke() {
        let mut state = CaptureState::default();
        let mut log = StrokeLog::new();

        assert_eq!(
            state.handle(&mut log, PointerEvent::Down(10.0, 10.0)),
            CaptureOutcome::Started
        );
        assert!(state.is_capturing());
        assert_eq!(
            state.handle(&mut log, PointerEvent::Move(10.0, 50.0)),
            CaptureOutcome::Extended
        );
        assert_eq!(
            state.handle(&mut log, PointerEvent::Up(10.0, 60.0)),
            CaptureOutcome::Finished
        );

        assert!(!state.is_capturing());
        assert_eq!(log.len(), 1);
        let stroke = log.last().unwrap();
        assert_eq!(stroke.tool(), ToolKind::Pen);
        assert_eq!(
            stroke.points(),
            &[Point::new(10.0, 10.0), Point::new(10.0, 50.0)]
        );
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut state = CaptureState::default();
        let mut log = StrokeLog::new();
        assert_eq!(
            state.handle(&mut log, PointerEvent::Move(1.0, 1.0)),
            CaptureOutcome::Ignored
        );
        assert_eq!(
            state.handle(&mut log, PointerEvent::Up(1.0, 1.0)),
            CaptureOutcome::Ignored
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_move_after_up_is_ignored() {
        let mut state = CaptureState::default();
        let mut log = StrokeLog::new();
        state.handle(&mut log, PointerEvent::Down(0.0, 0.0));
        state.handle(&mut log, PointerEvent::Leave(0.0, 0.0));
        state.handle(&mut log, PointerEvent::Move(5.0, 5.0));
        assert_eq!(log.last().unwrap().points().len(), 1);
    }

    #[test]
    fn test_tool_switch_rejected_while_capturing() {
        let mut state = CaptureState::new(ToolKind::Highlighter);
        let mut log = StrokeLog::new();
        state.handle(&mut log, PointerEvent::Down(0.0, 0.0));

        assert!(!state.set_tool(ToolKind::Eraser));
        assert_eq!(state.active_tool(), ToolKind::Highlighter);

        state.handle(&mut log, PointerEvent::Cancel(0.0, 0.0));
        assert!(state.set_tool(ToolKind::Eraser));
        state.handle(&mut log, PointerEvent::Down(1.0, 1.0));

        assert_eq!(log.strokes()[0].tool(), ToolKind::Highlighter);
        assert_eq!(log.strokes()[1].tool(), ToolKind::Eraser);
    }

    #[test]
    fn test_down_while_capturing_starts_new_stroke() {
        let mut state = CaptureState::default();
        let mut log = StrokeLog::new();
        state.handle(&mut log, PointerEvent::Down(0.0, 0.0));
        state.handle(&mut log, PointerEvent::Down(9.0, 9.0));
        state.handle(&mut log, PointerEvent::Move(10.0, 10.0));

        assert_eq!(log.len(), 2);
        assert_eq!(log.strokes()[0].points().len(), 1);
        assert_eq!(log.strokes()[1].points().len(), 2);
    }

    #[test]
    fn test_move_after_log_emptied_stops_capture() {
        let mut state = CaptureState::default();
        let mut log = StrokeLog::new();
        state.handle(&mut log, PointerEvent::Down(0.0, 0.0));
        log.pop();

        assert_eq!(
            state.handle(&mut log, PointerEvent::Move(1.0, 1.0)),
            CaptureOutcome::Ignored
        );
        assert!(!state.is_capturing());
        assert!(log.is_empty());
    }
}
