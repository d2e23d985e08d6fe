use tracing::{debug, warn};

use crate::core::{Rect, StepId};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::PluginEvent;
use crate::interaction::{EditMode, InteractionMode, ResizeEdge};
use crate::render::Renderer;
use crate::sync::{PendingSync, SyncOutcome};

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Starts moving a whole step. Returns `false` when another interaction
    /// owns the pointer.
    pub fn start_drag(&mut self, id: &StepId, pointer_x: f64) -> TimelineResult<bool> {
        self.begin_edit(id, EditMode::Dragging, pointer_x)
    }

    /// Starts dragging one edge of a step.
    pub fn start_resize(
        &mut self,
        id: &StepId,
        edge: ResizeEdge,
        pointer_x: f64,
    ) -> TimelineResult<bool> {
        self.begin_edit(id, edge.into(), pointer_x)
    }

    /// Ephemeral geometry of the step being edited.
    #[must_use]
    pub fn preview_rect(&self) -> Option<Rect> {
        self.edit.preview_rect()
    }

    #[must_use]
    pub fn editing_step(&self) -> Option<&StepId> {
        self.edit.state().map(|state| &state.step_id)
    }

    fn begin_edit(&mut self, id: &StepId, mode: EditMode, pointer_x: f64) -> TimelineResult<bool> {
        if !pointer_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "edit pointer x must be finite".to_owned(),
            ));
        }
        if !self.interaction.is_idle() {
            debug!(%id, mode = ?self.interaction.mode(), "suppress edit start");
            return Ok(false);
        }
        let (rect, span) = self.step_geometry(id)?;
        let interaction_mode = InteractionMode::from(mode);
        self.interaction.try_begin(interaction_mode);
        self.edit.start(id.clone(), mode, pointer_x, rect, span)?;
        self.session.begin(self.host.as_mut());
        debug!(%id, ?mode, pointer_x, "edit start");
        self.emit_plugin_event(PluginEvent::EditStarted {
            id: id.clone(),
            mode: interaction_mode,
        });
        Ok(true)
    }

    /// Applies the last queued move, converts the preview to instants and
    /// commits it optimistically.
    ///
    /// Returns the persistence future for the host to drive, or `None` when
    /// nothing changed.
    pub(super) fn release_edit(&mut self) -> TimelineResult<Option<PendingSync>> {
        if let Some(pointer_x) = self.session.flush(self.host.as_mut()) {
            self.edit.move_to(pointer_x);
        }
        let editing = self.edit.state().map(|state| state.step_id.clone());
        let commit = self.edit.release(self.time_scale());
        self.session.end(self.host.as_mut());
        self.interaction.finish();
        self.apply_deferred_width()?;

        let Some(commit) = commit else {
            debug!(id = ?editing, "edit released without change");
            if let Some(id) = editing {
                self.emit_plugin_event(PluginEvent::EditCancelled { id });
            }
            return Ok(None);
        };

        let generation = self.track_cache.generation();
        let pending = self
            .sync
            .commit(&mut self.steps, &mut self.track_cache, &commit)?;
        debug!(
            id = %commit.step_id,
            mode = ?commit.mode,
            start = %commit.span.start,
            end = %commit.span.end,
            "edit committed"
        );
        self.emit_plugin_event(PluginEvent::EditCommitted {
            id: commit.step_id.clone(),
        });
        self.emit_invalidation_since(generation);
        Ok(Some(pending))
    }

    pub(super) fn cancel_edit(&mut self) -> bool {
        let editing = self.edit.state().map(|state| state.step_id.clone());
        if !self.edit.cancel() {
            return false;
        }
        self.session.end(self.host.as_mut());
        self.interaction.finish();
        if let Err(err) = self.apply_deferred_width() {
            warn!(error = %err, "deferred resize dropped");
        }
        if let Some(id) = editing {
            debug!(%id, "edit cancelled");
            self.emit_plugin_event(PluginEvent::EditCancelled { id });
        }
        true
    }

    /// Feeds a resolved persistence outcome back into the engine.
    ///
    /// Failures are surfaced to plugins; the local overwrite is reverted only
    /// under `RollbackPolicy::RevertOnFailure`. Returns `true` when local
    /// state changed.
    pub fn apply_sync_outcome(&mut self, outcome: &SyncOutcome) -> TimelineResult<bool> {
        let SyncOutcome::Failed { id, error, .. } = outcome else {
            return Ok(false);
        };
        warn!(%id, error = %error, "optimistic edit not persisted");
        self.emit_plugin_event(PluginEvent::PersistenceFailed { id: id.clone() });

        let generation = self.track_cache.generation();
        let reverted = self
            .sync
            .revert(&mut self.steps, &mut self.track_cache, outcome)?;
        self.emit_invalidation_since(generation);
        Ok(reverted)
    }
}
