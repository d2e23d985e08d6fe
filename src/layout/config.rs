use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Vertical metrics and width floor for laid-out steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub item_height: f64,
    pub track_margin: f64,
    /// Space above the first track, reserved for the axis.
    pub padding_top: f64,
    /// Narrowest width a step rect may take, in pixels.
    pub min_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_height: 32.0,
            track_margin: 8.0,
            padding_top: 40.0,
            min_width: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        for (name, value) in [
            ("item height", self.item_height),
            ("min width", self.min_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "layout {name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("track margin", self.track_margin),
            ("padding top", self.padding_top),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "layout {name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn track_top(self, track: usize) -> f64 {
        self.padding_top + track as f64 * (self.item_height + self.track_margin)
    }

    /// Total height needed to show `track_count` tracks.
    #[must_use]
    pub fn content_height(self, track_count: usize) -> f64 {
        if track_count == 0 {
            return self.padding_top;
        }
        self.track_top(track_count - 1) + self.item_height
    }
}
