use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub min_level: f64,
    pub max_level: f64,
    pub step: f64,
    pub default_level: f64,
    /// Wheel delta that corresponds to one `step`.
    pub wheel_step_units: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_level: 0.25,
            max_level: 4.0,
            step: 0.25,
            default_level: 1.0,
            wheel_step_units: 120.0,
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.min_level.is_finite() || self.min_level <= 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom min level must be finite and > 0".to_owned(),
            ));
        }
        if !self.max_level.is_finite() || self.max_level < self.min_level {
            return Err(TimelineError::InvalidData(
                "zoom max level must be finite and >= min level".to_owned(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom step must be finite and > 0".to_owned(),
            ));
        }
        if !(self.min_level..=self.max_level).contains(&self.default_level) {
            return Err(TimelineError::InvalidData(
                "zoom default level must lie within [min, max]".to_owned(),
            ));
        }
        if !self.wheel_step_units.is_finite() || self.wheel_step_units <= 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom wheel step units must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Clamped, steppable zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    config: ZoomConfig,
    level: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomController {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            level: config.default_level,
        }
    }

    #[must_use]
    pub fn config(self) -> ZoomConfig {
        self.config
    }

    #[must_use]
    pub fn level(self) -> f64 {
        self.level
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_level(self.level + self.config.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_level(self.level - self.config.step)
    }

    /// Maps a wheel delta to a proportional level change.
    ///
    /// Negative deltas (wheel away from the user) zoom in. Non-finite deltas
    /// leave the level untouched.
    pub fn apply_wheel(&mut self, wheel_delta: f64) -> f64 {
        if !wheel_delta.is_finite() {
            return self.level;
        }
        let level_delta = -(wheel_delta / self.config.wheel_step_units) * self.config.step;
        self.set_level(self.level + level_delta)
    }

    pub fn reset(&mut self) -> f64 {
        self.set_level(self.config.default_level)
    }

    pub fn set_level(&mut self, level: f64) -> f64 {
        if level.is_finite() {
            self.level = level.clamp(self.config.min_level, self.config.max_level);
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomConfig, ZoomController};

    #[test]
    fn wheel_notch_moves_one_step() {
        let mut zoom = ZoomController::new(ZoomConfig::default());
        let level = zoom.apply_wheel(-120.0);
        assert!((level - 1.25).abs() <= 1e-12);
    }

    #[test]
    fn invalid_default_level_is_rejected() {
        let config = ZoomConfig {
            default_level: 10.0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
