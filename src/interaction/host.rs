use serde::{Deserialize, Serialize};

/// Opaque token for a set of global pointer-move/pointer-up listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerHandle(pub u64);

/// Opaque token for a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Event-loop services the engine borrows from its host.
///
/// Every acquired handle is released exactly once: on interaction end, on
/// cancel, or on engine teardown.
pub trait InteractionHost {
    fn acquire_pointer_listeners(&mut self) -> ListenerHandle;
    fn release_pointer_listeners(&mut self, handle: ListenerHandle);
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Host for headless use; hands out sequential handles and does nothing else.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_handle: u64,
}

impl HeadlessHost {
    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl InteractionHost for HeadlessHost {
    fn acquire_pointer_listeners(&mut self) -> ListenerHandle {
        ListenerHandle(self.next())
    }

    fn release_pointer_listeners(&mut self, _handle: ListenerHandle) {}

    fn request_frame(&mut self) -> FrameHandle {
        FrameHandle(self.next())
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}
}
