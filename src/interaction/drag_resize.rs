use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::core::{Rect, StepId, StepSpan, TimeScale};
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    Dragging,
    ResizingLeft,
    ResizingRight,
}

/// Which edge of a step a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    Left,
    Right,
}

impl From<ResizeEdge> for EditMode {
    fn from(edge: ResizeEdge) -> Self {
        match edge {
            ResizeEdge::Left => Self::ResizingLeft,
            ResizeEdge::Right => Self::ResizingRight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragResizeState {
    pub mode: EditMode,
    pub step_id: StepId,
    pub origin_pointer_x: f64,
    pub origin_rect: Rect,
    pub origin_span: StepSpan,
    pub preview_rect: Option<Rect>,
}

/// New time range produced by a finished drag or resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditCommit {
    pub step_id: StepId,
    pub mode: EditMode,
    pub span: StepSpan,
    pub previous: StepSpan,
}

/// Per-item state machine for whole-item moves and single-edge resizes.
///
/// Moves only produce preview geometry; the committed step is untouched until
/// [`DragResizeController::release`] converts the preview back to instants.
#[derive(Debug, Clone, PartialEq)]
pub struct DragResizeController {
    min_width: f64,
    state: Option<DragResizeState>,
}

impl DragResizeController {
    #[must_use]
    pub fn new(min_width: f64) -> Self {
        Self {
            min_width,
            state: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<&DragResizeState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn mode(&self) -> Option<EditMode> {
        self.state.as_ref().map(|state| state.mode)
    }

    #[must_use]
    pub fn preview_rect(&self) -> Option<Rect> {
        self.state.as_ref().and_then(|state| state.preview_rect)
    }

    pub fn start(
        &mut self,
        step_id: StepId,
        mode: EditMode,
        pointer_x: f64,
        origin_rect: Rect,
        origin_span: StepSpan,
    ) -> TimelineResult<()> {
        if !pointer_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "edit pointer x must be finite".to_owned(),
            ));
        }
        self.state = Some(DragResizeState {
            mode,
            step_id,
            origin_pointer_x: pointer_x,
            origin_rect,
            origin_span,
            preview_rect: None,
        });
        Ok(())
    }

    /// Updates and returns the preview rect for `pointer_x`.
    pub fn move_to(&mut self, pointer_x: f64) -> Option<Rect> {
        let min_width = self.min_width;
        let state = self.state.as_mut()?;
        if !pointer_x.is_finite() {
            return state.preview_rect;
        }
        let preview = preview_geometry(state, pointer_x, min_width);
        state.preview_rect = Some(preview);
        Some(preview)
    }

    /// Finishes the gesture and returns the commit, if the range changed.
    ///
    /// The controller is idle afterwards either way.
    pub fn release(&mut self, scale: TimeScale) -> Option<EditCommit> {
        let state = self.state.take()?;
        let preview = state.preview_rect.unwrap_or(state.origin_rect);
        let span = resolve_release_span(&state, preview, scale);
        if span == state.origin_span {
            return None;
        }
        Some(EditCommit {
            step_id: state.step_id,
            mode: state.mode,
            span,
            previous: state.origin_span,
        })
    }

    /// Drops the gesture without committing.
    pub fn cancel(&mut self) -> bool {
        self.state.take().is_some()
    }
}

fn preview_geometry(state: &DragResizeState, pointer_x: f64, min_width: f64) -> Rect {
    let delta = pointer_x - state.origin_pointer_x;
    let origin = state.origin_rect;
    match state.mode {
        EditMode::Dragging => Rect::new(origin.left + delta, origin.width, origin.top, origin.height),
        EditMode::ResizingLeft => {
            let width = origin.width - delta;
            if width < min_width {
                // Frozen: the right edge stays where it was.
                Rect::new(origin.right() - min_width, min_width, origin.top, origin.height)
            } else {
                Rect::new(origin.left + delta, width, origin.top, origin.height)
            }
        }
        EditMode::ResizingRight => Rect::new(
            origin.left,
            (origin.width + delta).max(min_width),
            origin.top,
            origin.height,
        ),
    }
}

fn resolve_release_span(state: &DragResizeState, preview: Rect, scale: TimeScale) -> StepSpan {
    let origin = state.origin_span;
    let one_day = Duration::days(1);
    match state.mode {
        EditMode::Dragging => {
            let start = scale.inverse(preview.left);
            StepSpan::new(start, start + origin.duration())
        }
        EditMode::ResizingLeft => {
            let start = scale.inverse(preview.left).min(origin.end - one_day);
            StepSpan::new(start, origin.end)
        }
        EditMode::ResizingRight => {
            let end = scale.inverse(preview.right()).max(origin.start + one_day);
            StepSpan::new(origin.start, end)
        }
    }
}
