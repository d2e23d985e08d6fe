mod edit_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod frame_builder;
mod interaction_controller;
mod json_contract;
mod layout_coordinator;
mod pan_zoom_controller;
mod plugin_dispatch;
mod viewport_controller;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
