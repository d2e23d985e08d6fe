use tracing::trace;

use super::host::{FrameHandle, InteractionHost, ListenerHandle};

/// Scoped resources and coalesced input for one pointer interaction.
///
/// Pointer moves between two frames collapse to the latest value; at most one
/// frame request is outstanding at any time.
#[derive(Debug, Default)]
pub struct InteractionSession {
    listeners: Option<ListenerHandle>,
    frame: Option<FrameHandle>,
    pending_pointer_x: Option<f64>,
    coalesced_moves: u64,
}

impl InteractionSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn pending_pointer_x(&self) -> Option<f64> {
        self.pending_pointer_x
    }

    /// Moves dropped in favour of a later value since the session began.
    #[must_use]
    pub fn coalesced_moves(&self) -> u64 {
        self.coalesced_moves
    }

    pub fn begin(&mut self, host: &mut dyn InteractionHost) {
        if self.listeners.is_none() {
            self.listeners = Some(host.acquire_pointer_listeners());
        }
        self.coalesced_moves = 0;
    }

    /// Records the latest pointer x. Returns `true` when a frame was requested.
    pub fn queue_move(&mut self, host: &mut dyn InteractionHost, pointer_x: f64) -> bool {
        if self.pending_pointer_x.replace(pointer_x).is_some() {
            self.coalesced_moves += 1;
            trace!(pointer_x, coalesced = self.coalesced_moves, "coalesce pointer move");
        }
        if self.frame.is_some() {
            return false;
        }
        self.frame = Some(host.request_frame());
        true
    }

    /// Consumes the frame and yields the pointer x to apply, if any.
    pub fn take_frame(&mut self) -> Option<f64> {
        self.frame = None;
        self.pending_pointer_x.take()
    }

    /// Cancels any outstanding frame and yields the unapplied pointer x.
    pub fn flush(&mut self, host: &mut dyn InteractionHost) -> Option<f64> {
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        self.pending_pointer_x.take()
    }

    /// Releases every held resource. Safe to call when idle.
    pub fn end(&mut self, host: &mut dyn InteractionHost) {
        self.flush(host);
        if let Some(listeners) = self.listeners.take() {
            host.release_pointer_listeners(listeners);
        }
    }
}
