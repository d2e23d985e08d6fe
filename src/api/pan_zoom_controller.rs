use tracing::debug;

use crate::error::{TimelineError, TimelineResult};
use crate::extensions::PluginEvent;
use crate::interaction::{InteractionMode, ZoomController};
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Begins a background pan. Returns `false` when another interaction
    /// already owns the pointer, e.g. a drag that started on a step.
    pub fn start_pan(&mut self, pointer_x: f64) -> TimelineResult<bool> {
        if !pointer_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "pan pointer x must be finite".to_owned(),
            ));
        }
        if !self.interaction.try_begin(InteractionMode::Panning) {
            debug!(mode = ?self.interaction.mode(), "suppress pan start");
            return Ok(false);
        }
        self.pan.start(pointer_x, self.center)?;
        self.session.begin(self.host.as_mut());
        debug!(pointer_x, center = %self.center, "pan start");
        self.emit_plugin_event(PluginEvent::PanStarted);
        Ok(true)
    }

    /// Queues a pan move; applied on the next animation frame.
    pub fn move_pan(&mut self, pointer_x: f64) -> bool {
        if self.interaction.mode() != InteractionMode::Panning {
            return false;
        }
        self.move_interaction(pointer_x)
    }

    /// Applies any queued move and ends the pan. Returns `false` when no pan
    /// was active.
    pub fn end_pan(&mut self) -> TimelineResult<bool> {
        if self.interaction.mode() != InteractionMode::Panning {
            return Ok(false);
        }
        let flushed = self.session.flush(self.host.as_mut());
        let result = match flushed {
            Some(pointer_x) => self.apply_pan_move(pointer_x),
            None => Ok(()),
        };
        self.finish_pan();
        result.map(|()| true)
    }

    pub(super) fn apply_pan_move(&mut self, pointer_x: f64) -> TimelineResult<()> {
        let Some(center) = self.pan.move_to(pointer_x) else {
            return Ok(());
        };
        self.apply_view(center, self.zoom.level(), self.pixel_width)
    }

    pub(super) fn finish_pan(&mut self) {
        if self.pan.end() {
            self.session.end(self.host.as_mut());
            self.interaction.finish();
            debug!(center = %self.center, "pan end");
            self.emit_plugin_event(PluginEvent::PanEnded);
        }
    }

    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom.level()
    }

    pub fn zoom_in(&mut self) -> TimelineResult<f64> {
        self.apply_zoom(ZoomController::zoom_in)
    }

    pub fn zoom_out(&mut self) -> TimelineResult<f64> {
        self.apply_zoom(ZoomController::zoom_out)
    }

    pub fn reset_zoom(&mut self) -> TimelineResult<f64> {
        self.apply_zoom(ZoomController::reset)
    }

    /// Continuous zoom from a wheel delta; see [`ZoomController::apply_wheel`].
    pub fn wheel_zoom(&mut self, wheel_delta: f64) -> TimelineResult<f64> {
        self.apply_zoom(|zoom| zoom.apply_wheel(wheel_delta))
    }

    fn apply_zoom(&mut self, change: impl FnOnce(&mut ZoomController) -> f64) -> TimelineResult<f64> {
        let committed = self.zoom;
        let previous = committed.level();
        if self.interaction.is_editing() {
            debug!(previous, mode = ?self.interaction.mode(), "suppress zoom during edit");
            return Ok(previous);
        }
        let mut next = committed;
        let level = change(&mut next);
        if level == previous {
            return Ok(level);
        }
        self.zoom = next;
        if let Err(err) = self.apply_view(self.center, level, self.pixel_width) {
            self.zoom = committed;
            return Err(err);
        }
        debug!(previous, level, "zoom changed");
        self.emit_plugin_event(PluginEvent::ZoomChanged { level });
        Ok(level)
    }
}
