use tracing::{debug, trace, warn};

use crate::error::TimelineResult;
use crate::interaction::InteractionMode;
use crate::render::Renderer;
use crate::sync::PendingSync;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Queues the latest pointer x for the active interaction.
    ///
    /// Moves are coalesced: only the latest value is applied on the next
    /// [`TimelineEngine::on_animation_frame`]. Returns `true` when this call
    /// requested a new frame from the host.
    pub fn move_interaction(&mut self, pointer_x: f64) -> bool {
        if self.interaction.is_idle() || !pointer_x.is_finite() {
            return false;
        }
        self.session.queue_move(self.host.as_mut(), pointer_x)
    }

    /// Host animation-frame callback. Returns `true` when a queued move was
    /// applied; stale frames after an interaction ended are ignored.
    pub fn on_animation_frame(&mut self) -> TimelineResult<bool> {
        let Some(pointer_x) = self.session.take_frame() else {
            return Ok(false);
        };
        trace!(pointer_x, mode = ?self.interaction.mode(), "apply frame");
        match self.interaction.mode() {
            InteractionMode::Idle => Ok(false),
            InteractionMode::Panning => {
                self.apply_pan_move(pointer_x)?;
                Ok(true)
            }
            InteractionMode::Dragging
            | InteractionMode::ResizingLeft
            | InteractionMode::ResizingRight => Ok(self.edit.move_to(pointer_x).is_some()),
        }
    }

    /// Pointer-up for whichever interaction is active.
    ///
    /// Edits yield the persistence future to spawn on the host executor.
    pub fn release_interaction(&mut self) -> TimelineResult<Option<PendingSync>> {
        match self.interaction.mode() {
            InteractionMode::Idle => Ok(None),
            InteractionMode::Panning => self.end_pan().map(|_| None),
            InteractionMode::Dragging
            | InteractionMode::ResizingLeft
            | InteractionMode::ResizingRight => self.release_edit(),
        }
    }

    /// Aborts the active interaction (focus loss, escape key) without
    /// committing. Pan moves already applied are kept.
    pub fn cancel_interaction(&mut self) -> bool {
        match self.interaction.mode() {
            InteractionMode::Idle => false,
            InteractionMode::Panning => {
                self.session.flush(self.host.as_mut());
                self.finish_pan();
                true
            }
            InteractionMode::Dragging
            | InteractionMode::ResizingLeft
            | InteractionMode::ResizingRight => self.cancel_edit(),
        }
    }

    /// Releases every host resource. Also runs when the engine is dropped.
    pub fn teardown(&mut self) {
        let had_session = self.session.is_active() || self.session.has_pending_frame();
        self.pan.end();
        self.edit.cancel();
        self.session.end(self.host.as_mut());
        self.interaction.finish();
        if let Err(err) = self.apply_deferred_width() {
            warn!(error = %err, "deferred resize dropped");
        }
        if had_session {
            debug!("interaction torn down");
        }
    }
}
