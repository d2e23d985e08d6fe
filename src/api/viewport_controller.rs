use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::{AxisMarker, TimeScale, Viewport};
use crate::error::TimelineResult;
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Current visible window.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        TimeScale::new(self.viewport)
    }

    #[must_use]
    pub fn center(&self) -> DateTime<Utc> {
        self.center
    }

    #[must_use]
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Window for arbitrary inputs, using this engine's density tuning.
    pub fn compute_viewport(
        &self,
        center: DateTime<Utc>,
        zoom_level: f64,
        pixel_width: f64,
    ) -> TimelineResult<Viewport> {
        self.viewport_controller
            .compute_window(center, zoom_level, pixel_width)
    }

    #[must_use]
    pub fn generate_markers(&self) -> Vec<AxisMarker> {
        self.viewport_controller.generate_markers(self.viewport)
    }

    /// Moves the window. Returns `false` while a drag or resize is active,
    /// since the edit preview is measured in the current window's pixels.
    pub fn set_center(&mut self, center: DateTime<Utc>) -> TimelineResult<bool> {
        if self.interaction.is_editing() {
            debug!(%center, mode = ?self.interaction.mode(), "suppress recenter during edit");
            return Ok(false);
        }
        self.apply_view(center, self.zoom.level(), self.pixel_width)?;
        Ok(true)
    }

    /// Host resize entry point.
    ///
    /// During a drag or resize the width is validated and held back until the
    /// edit is released or cancelled; the call then returns `false`.
    pub fn set_pixel_width(&mut self, pixel_width: f64) -> TimelineResult<bool> {
        if self.interaction.is_editing() {
            self.compute_viewport(self.center, self.zoom.level(), pixel_width)?;
            debug!(pixel_width, "defer resize until edit ends");
            self.deferred_pixel_width = Some(pixel_width);
            return Ok(false);
        }
        self.apply_view(self.center, self.zoom.level(), pixel_width)?;
        Ok(true)
    }

    pub(super) fn apply_deferred_width(&mut self) -> TimelineResult<()> {
        match self.deferred_pixel_width.take() {
            Some(pixel_width) => self.apply_view(self.center, self.zoom.level(), pixel_width),
            None => Ok(()),
        }
    }

    /// Recomputes the window and commits the inputs only when it is valid.
    pub(super) fn apply_view(
        &mut self,
        center: DateTime<Utc>,
        zoom_level: f64,
        pixel_width: f64,
    ) -> TimelineResult<()> {
        let viewport = self.compute_viewport(center, zoom_level, pixel_width)?;
        self.center = center;
        self.pixel_width = pixel_width;
        if viewport == self.viewport {
            return Ok(());
        }
        trace!(start = %viewport.start, end = %viewport.end, "viewport changed");
        self.viewport = viewport;
        self.emit_plugin_event(PluginEvent::ViewportChanged { viewport });
        Ok(())
    }
}
