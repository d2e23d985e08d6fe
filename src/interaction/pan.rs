use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::fractional_days;
use crate::error::{TimelineError, TimelineResult};

/// Pan gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanConfig {
    /// Pointer pixels that move the center by one day.
    pub pixels_per_day: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            pixels_per_day: 15.0,
        }
    }
}

impl PanConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.pixels_per_day.is_finite() || self.pixels_per_day <= 0.0 {
            return Err(TimelineError::InvalidData(
                "pan pixels per day must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanState {
    pub active: bool,
    pub origin_pointer_x: f64,
    #[serde(with = "crate::core::primitives::iso_instant")]
    pub origin_center: DateTime<Utc>,
}

/// Converts horizontal pointer drag into a new center instant.
///
/// Every move is resolved against the gesture origin, so panning by `+d` and
/// back by `-d` within one gesture restores the original center exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanController {
    config: PanConfig,
    state: Option<PanState>,
}

impl PanController {
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> PanConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> Option<PanState> {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn start(&mut self, pointer_x: f64, current_center: DateTime<Utc>) -> TimelineResult<()> {
        if !pointer_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "pan pointer x must be finite".to_owned(),
            ));
        }
        self.state = Some(PanState {
            active: true,
            origin_pointer_x: pointer_x,
            origin_center: current_center,
        });
        Ok(())
    }

    /// Center implied by `pointer_x`, or `None` while idle.
    #[must_use]
    pub fn move_to(&self, pointer_x: f64) -> Option<DateTime<Utc>> {
        let state = self.state?;
        if !pointer_x.is_finite() {
            return None;
        }
        let delta_px = pointer_x - state.origin_pointer_x;
        let days_moved = -delta_px / self.config.pixels_per_day;
        state
            .origin_center
            .checked_add_signed(fractional_days(days_moved))
    }

    /// Returns `true` when a pan was active.
    pub fn end(&mut self) -> bool {
        self.state.take().is_some()
    }
}
