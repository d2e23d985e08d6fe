use tracing::{debug, trace};

use crate::core::{Rect, ReplaceSummary, Step, StepId, StepSpan};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::PluginEvent;
use crate::layout::{TimelineLayout, compute_layout, step_rect};
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Host-driven layout pass over the local steps and the current viewport.
    pub fn compute_layout(&mut self) -> TimelineResult<TimelineLayout> {
        let layout = compute_layout(
            self.steps.iter(),
            self.viewport,
            &mut self.track_cache,
            self.layout_config,
        )?;
        trace!(
            visible = layout.rects.len(),
            tracks = layout.assignment.track_count,
            "layout pass"
        );
        Ok(layout)
    }

    /// Loads authoritative steps from the collaborator.
    pub fn replace_steps(&mut self, steps: Vec<Step>) -> TimelineResult<ReplaceSummary> {
        let generation = self.track_cache.generation();
        let summary = self
            .sync
            .reconcile(&mut self.steps, &mut self.track_cache, steps)?;
        debug!(
            count = summary.count,
            geometry_changed = summary.geometry_changed,
            "replace steps"
        );
        self.emit_plugin_event(PluginEvent::StepsReplaced {
            steps_len: summary.count,
        });
        self.emit_invalidation_since(generation);
        Ok(summary)
    }

    /// Parses the collaborator's JSON step list and loads it.
    pub fn replace_steps_from_json(&mut self, input: &str) -> TimelineResult<ReplaceSummary> {
        let steps: Vec<Step> = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse steps json payload: {e}"))
        })?;
        self.replace_steps(steps)
    }

    /// Current rect and range of one step, visible or not.
    pub(super) fn step_geometry(&mut self, id: &StepId) -> TimelineResult<(Rect, StepSpan)> {
        let layout = self.compute_layout()?;
        let step = self
            .steps
            .get(id)
            .ok_or_else(|| TimelineError::UnknownStep(id.clone()))?;
        let track = layout
            .assignment
            .track_of(id)
            .ok_or_else(|| TimelineError::UnknownStep(id.clone()))?;
        let rect = step_rect(step, self.time_scale(), track, self.layout_config);
        Ok((rect, step.span()))
    }

    pub(super) fn emit_invalidation_since(&mut self, generation: u64) {
        let current = self.track_cache.generation();
        if current != generation {
            self.emit_plugin_event(PluginEvent::LayoutInvalidated {
                generation: current,
            });
        }
    }
}
