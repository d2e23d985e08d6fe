//! timeline-rs: interactive timeline layout engine.
//!
//! The crate maps time ranges onto a horizontal pixel axis, packs
//! overlapping steps into tracks and drives pan, zoom, drag and resize
//! gestures. Committed edits are applied locally first and persisted through
//! an injected store.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod sync;
pub mod telemetry;

pub use api::{EngineSnapshot, TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
