mod drag_resize;
mod host;
mod pan;
mod session;
mod zoom;

use serde::{Deserialize, Serialize};

pub use drag_resize::{DragResizeController, DragResizeState, EditCommit, EditMode, ResizeEdge};
pub use host::{FrameHandle, HeadlessHost, InteractionHost, ListenerHandle};
pub use pan::{PanConfig, PanController, PanState};
pub use session::InteractionSession;
pub use zoom::{ZoomConfig, ZoomController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Dragging,
    ResizingLeft,
    ResizingRight,
}

impl From<EditMode> for InteractionMode {
    fn from(mode: EditMode) -> Self {
        match mode {
            EditMode::Dragging => Self::Dragging,
            EditMode::ResizingLeft => Self::ResizingLeft,
            EditMode::ResizingRight => Self::ResizingRight,
        }
    }
}

/// Arbiter guaranteeing at most one pointer interaction at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self.mode == InteractionMode::Idle
    }

    /// A drag or resize owns the pointer and holds pixel geometry.
    #[must_use]
    pub fn is_editing(self) -> bool {
        matches!(
            self.mode,
            InteractionMode::Dragging | InteractionMode::ResizingLeft | InteractionMode::ResizingRight
        )
    }

    /// Enters `mode` if idle. Returns `false` when another interaction owns
    /// the pointer.
    pub fn try_begin(&mut self, mode: InteractionMode) -> bool {
        if !self.is_idle() || mode == InteractionMode::Idle {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn finish(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
