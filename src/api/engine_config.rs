use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ViewportTuning;
use crate::core::primitives::iso_instant;
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{PanConfig, ZoomConfig};
use crate::layout::LayoutConfig;
use crate::sync::RollbackPolicy;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub pixel_width: f64,
    #[serde(with = "iso_instant")]
    pub center: DateTime<Utc>,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub pan: PanConfig,
    #[serde(default)]
    pub viewport: ViewportTuning,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub rollback_policy: RollbackPolicy,
}

impl TimelineEngineConfig {
    /// Creates a config with default tuning everywhere.
    #[must_use]
    pub fn new(pixel_width: f64, center: DateTime<Utc>) -> Self {
        Self {
            pixel_width,
            center,
            zoom: ZoomConfig::default(),
            pan: PanConfig::default(),
            viewport: ViewportTuning::default(),
            layout: LayoutConfig::default(),
            rollback_policy: RollbackPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_pan(mut self, pan: PanConfig) -> Self {
        self.pan = pan;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_rollback_policy(mut self, policy: RollbackPolicy) -> Self {
        self.rollback_policy = policy;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.pixel_width.is_finite() || self.pixel_width <= 0.0 {
            return Err(TimelineError::InvalidViewport {
                pixel_width: self.pixel_width,
            });
        }
        self.zoom.validate()?;
        self.pan.validate()?;
        self.viewport.validate()?;
        self.layout.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config json: {e}"))
        })
    }
}
