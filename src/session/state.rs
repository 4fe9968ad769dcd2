use image::RgbaImage;

use crate::annotations::handlers;
use crate::capture::data_url;
use crate::capture::image::{BaseImage, ImageSource};
use crate::capture::input::{CaptureOutcome, CaptureState, PointerEvent};
use crate::config::{InkConfig, ToolPolicy};
use crate::domain::{StrokeLog, ToolKind};
use crate::error::{ImageLoadError, InkError, RenderError, StrokeLogError};
use crate::render;
use crate::session::messages::SessionMsg;

/// Output of a successful save
#[derive(Clone, Debug, PartialEq)]
pub struct SaveResult {
    /// Flattened PNG, no longer editable
    pub flattened: Vec<u8>,
    /// Copy of the stroke log, for resuming later against the original image
    pub strokes: StrokeLog,
}

impl SaveResult {
    /// The flattened raster as a `data:image/png;base64,` URL
    pub fn to_data_url(&self) -> String {
        data_url::encode_png(&self.flattened)
    }

    /// The stroke log in its persisted JSON shape
    pub fn strokes_json(&self) -> Result<String, StrokeLogError> {
        self.strokes.to_json()
    }
}

/// One image being annotated
///
/// Owns the stroke log and the capture state. The base image is only read.
#[derive(Clone, Debug)]
pub struct AnnotationSession {
    base: BaseImage,
    strokes: StrokeLog,
    capture: CaptureState,
    policy: ToolPolicy,
}

impl AnnotationSession {
    /// Start a session with an empty stroke log
    pub fn open(
        image: impl Into<ImageSource>,
        config: &InkConfig,
    ) -> Result<Self, ImageLoadError> {
        Self::resume(image, StrokeLog::new(), config)
    }

    /// Start a session from previously saved strokes
    pub fn resume(
        image: impl Into<ImageSource>,
        strokes: StrokeLog,
        config: &InkConfig,
    ) -> Result<Self, ImageLoadError> {
        let base = image.into().load()?;
        log::debug!(
            "Session opened on {}x{} image with {} strokes",
            base.width(),
            base.height(),
            strokes.len()
        );
        Ok(Self {
            base,
            strokes,
            capture: CaptureState::new(config.default_tool),
            policy: config.tool_policy,
        })
    }

    pub fn base_image(&self) -> &BaseImage {
        &self.base
    }

    pub fn strokes(&self) -> &StrokeLog {
        &self.strokes
    }

    pub fn active_tool(&self) -> ToolKind {
        self.capture.active_tool()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    /// Feed a pointer event to the capture state machine
    pub fn pointer(&mut self, event: PointerEvent) -> CaptureOutcome {
        self.capture.handle(&mut self.strokes, event)
    }

    /// Select the tool for the next stroke; ignored while capturing
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        self.capture.set_tool(tool)
    }

    /// Switch to the next tool in the cycle; ignored while capturing
    pub fn cycle_tool(&mut self) -> bool {
        let next = self.active_tool().next();
        self.set_tool(next)
    }

    /// Remove the most recent stroke
    ///
    /// Calling this on an empty log does nothing. Undoing mid-capture ends the
    /// capture so later move events cannot land on an older stroke.
    pub fn undo(&mut self) -> bool {
        self.capture.cancel();
        match self.strokes.pop() {
            Some(stroke) => {
                log::debug!(
                    "Undid {} stroke, {} remaining",
                    stroke.tool(),
                    self.strokes.len()
                );
                true
            }
            None => false,
        }
    }

    /// Render the current state, including a stroke still being drawn
    pub fn render_preview(&self) -> Result<RgbaImage, RenderError> {
        render::render(self.base.rgba(), &self.strokes, &self.policy)
    }

    /// Flatten the strokes onto the base image
    ///
    /// Never modifies the session, so a failed save can be retried.
    pub fn save(&self) -> Result<SaveResult, RenderError> {
        let flattened = render::flatten(self.base.rgba(), &self.strokes, &self.policy)?;
        Ok(SaveResult {
            flattened,
            strokes: self.strokes.clone(),
        })
    }

    /// Discard the session, ending any capture in progress
    pub fn close(mut self) {
        if self.capture.is_capturing() {
            self.capture.cancel();
            log::debug!("Session closed mid-capture; partial stroke kept as drawn");
        }
        log::debug!("Session closed with {} strokes", self.strokes.len());
    }
}

/// Message-driven owner of at most one live [`AnnotationSession`]
#[derive(Debug, Default)]
pub struct Annotator {
    pub(crate) config: InkConfig,
    pub(crate) session: Option<AnnotationSession>,
}

impl Annotator {
    pub fn new(config: InkConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &InkConfig {
        &self.config
    }

    /// The live session, if an image is open
    pub fn session(&self) -> Option<&AnnotationSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Process one message; only [`SessionMsg::Save`] produces a result
    pub fn handle(&mut self, msg: SessionMsg) -> Result<Option<SaveResult>, InkError> {
        handlers::handle_session_msg(self, msg)
    }
}
