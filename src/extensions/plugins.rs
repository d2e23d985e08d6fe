use serde::{Deserialize, Serialize};

use crate::core::{StepId, Viewport};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub zoom_level: f64,
    pub steps_len: usize,
    pub interaction_mode: InteractionMode,
    pub pending_syncs: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    StepsReplaced { steps_len: usize },
    ViewportChanged { viewport: Viewport },
    ZoomChanged { level: f64 },
    PanStarted,
    PanEnded,
    EditStarted { id: StepId, mode: InteractionMode },
    EditCancelled { id: StepId },
    EditCommitted { id: StepId },
    LayoutInvalidated { generation: u64 },
    PersistenceFailed { id: StepId },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals directly.
pub trait TimelinePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
