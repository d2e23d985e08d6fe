use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::iso_instant;
use crate::core::{AxisMarker, Rect, Viewport};
use crate::error::TimelineResult;
use crate::interaction::InteractionMode;
use crate::layout::TimelineLayout;
use crate::render::Renderer;

use super::TimelineEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    #[serde(with = "iso_instant")]
    pub center: DateTime<Utc>,
    pub zoom_level: f64,
    pub interaction_mode: InteractionMode,
    pub track_cache_generation: u64,
    pub pending_syncs: usize,
    pub layout: TimelineLayout,
    pub markers: Vec<AxisMarker>,
    pub preview_rect: Option<Rect>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Runs a layout pass and captures the resulting state.
    pub fn snapshot(&mut self) -> TimelineResult<EngineSnapshot> {
        let layout = self.compute_layout()?;
        Ok(EngineSnapshot {
            viewport: self.viewport,
            center: self.center,
            zoom_level: self.zoom.level(),
            interaction_mode: self.interaction.mode(),
            track_cache_generation: self.track_cache.generation(),
            pending_syncs: self.sync.in_flight(),
            layout,
            markers: self.generate_markers(),
            preview_rect: self.edit.preview_rect(),
        })
    }
}
