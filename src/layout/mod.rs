//! Overlap-aware vertical placement of steps.

mod config;
mod track_assigner;
mod track_cache;

pub use config::LayoutConfig;
pub use track_assigner::{
    TimelineLayout, TrackAssigner, TrackAssignment, compute_layout, step_rect,
};
pub use track_cache::TrackCache;
