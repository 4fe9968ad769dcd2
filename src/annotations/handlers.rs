//! Session message handlers
//!
//! Handles SessionMsg for the annotation controller.

use crate::capture::image::ImageSource;
use crate::capture::input::PointerEvent;
use crate::domain::StrokeLog;
use crate::error::InkError;
use crate::session::messages::{SessionMsg, ToolMsg};
use crate::session::state::{AnnotationSession, Annotator, SaveResult};

/// Handle a SessionMsg, modifying the annotator state
///
/// Messages that need a session are ignored when none is open. Only
/// `Save` returns a result; failures leave the session as it was.
pub fn handle_session_msg(
    annotator: &mut Annotator,
    msg: SessionMsg,
) -> Result<Option<SaveResult>, InkError> {
    match msg {
        SessionMsg::Open { image, strokes } => {
            handle_open(annotator, image, strokes)?;
            Ok(None)
        }
        SessionMsg::Close => {
            handle_close(annotator);
            Ok(None)
        }
        SessionMsg::Pointer(event) => {
            with_session(annotator, |session| handle_pointer(session, event));
            Ok(None)
        }
        SessionMsg::Tool(action) => {
            with_session(annotator, |session| handle_tool(session, action));
            Ok(None)
        }
        SessionMsg::Undo => {
            with_session(annotator, |session| {
                if !session.undo() {
                    log::debug!("Nothing to undo");
                }
            });
            Ok(None)
        }
        SessionMsg::Save => match annotator.session.as_ref() {
            Some(session) => Ok(Some(session.save()?)),
            None => {
                log::debug!("Save requested with no open session");
                Ok(None)
            }
        },
    }
}

// ============================================================================
// Lifecycle handlers
// ============================================================================

fn handle_open(
    annotator: &mut Annotator,
    image: ImageSource,
    strokes: Option<StrokeLog>,
) -> Result<(), InkError> {
    // Decode before touching the current session so a bad image changes nothing
    let session = AnnotationSession::resume(image, strokes.unwrap_or_default(), &annotator.config)?;
    if let Some(previous) = annotator.session.replace(session) {
        log::warn!("Opening a new image discards the current session");
        previous.close();
    }
    Ok(())
}

fn handle_close(annotator: &mut Annotator) {
    match annotator.session.take() {
        Some(session) => session.close(),
        None => log::debug!("Close requested with no open session"),
    }
}

// ============================================================================
// Session handlers
// ============================================================================

fn handle_pointer(session: &mut AnnotationSession, event: PointerEvent) {
    let outcome = session.pointer(event);
    log::trace!("{:?} -> {:?}", event, outcome);
}

fn handle_tool(session: &mut AnnotationSession, action: ToolMsg) {
    let changed = match action {
        ToolMsg::Select(tool) => session.set_tool(tool),
        ToolMsg::Cycle => session.cycle_tool(),
    };
    if changed {
        log::debug!("Active tool is now {}", session.active_tool());
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn with_session(annotator: &mut Annotator, f: impl FnOnce(&mut AnnotationSession)) {
    match annotator.session.as_mut() {
        Some(session) => f(session),
        None => log::debug!("No open session, ignoring message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToolKind;
    use image::RgbaImage;

    fn open_annotator() -> Annotator {
        let mut annotator = Annotator::default();
        annotator
            .handle(SessionMsg::open(RgbaImage::new(20, 20)))
            .unwrap();
        annotator
    }

    #[test]
    fn test_messages_without_session_are_ignored() {
        let mut annotator = Annotator::default();
        assert!(annotator.handle(SessionMsg::pointer_down(1.0, 1.0)).unwrap().is_none());
        assert!(annotator.handle(SessionMsg::Undo).unwrap().is_none());
        assert!(annotator.handle(SessionMsg::Save).unwrap().is_none());
        assert!(annotator.handle(SessionMsg::Close).unwrap().is_none());
        assert!(!annotator.is_open());
    }

    #[test]
    fn test_failed_open_keeps_current_session() {
        let mut annotator = open_annotator();
        annotator.handle(SessionMsg::pointer_down(2.0, 2.0)).unwrap();

        let err = annotator
            .handle(SessionMsg::open(ImageSource::DataUrl("garbage".into())))
            .unwrap_err();
        assert!(matches!(err, InkError::ImageLoad(_)));
        assert_eq!(annotator.session().unwrap().strokes().len(), 1);
    }

    #[test]
    fn test_open_replaces_previous_session() {
        let mut annotator = open_annotator();
        annotator.handle(SessionMsg::pointer_down(2.0, 2.0)).unwrap();
        annotator
            .handle(SessionMsg::open(RgbaImage::new(5, 5)))
            .unwrap();

        let session = annotator.session().unwrap();
        assert_eq!(session.base_image().width(), 5);
        assert!(session.strokes().is_empty());
    }

    #[test]
    fn test_tool_messages() {
        let mut annotator = open_annotator();
        annotator
            .handle(SessionMsg::select_tool(ToolKind::Eraser))
            .unwrap();
        assert_eq!(annotator.session().unwrap().active_tool(), ToolKind::Eraser);

        annotator.handle(SessionMsg::cycle_tool()).unwrap();
        assert_eq!(annotator.session().unwrap().active_tool(), ToolKind::Pen);
    }

    #[test]
    fn test_close_mid_capture_keeps_nothing_live() {
        let mut annotator = open_annotator();
        annotator.handle(SessionMsg::pointer_down(1.0, 1.0)).unwrap();
        annotator.handle(SessionMsg::Close).unwrap();
        assert!(!annotator.is_open());
    }
}
