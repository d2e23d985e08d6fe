use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis_markers::{AxisMarker, generate_markers};
use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};

/// Tuning for deriving the visible window from zoom and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    /// Pixels per day at zoom level `1.0`.
    pub pixel_density: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            pixel_density: 10.0,
        }
    }
}

impl ViewportTuning {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.pixel_density.is_finite() || self.pixel_density <= 0.0 {
            return Err(TimelineError::InvalidData(
                "viewport pixel density must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Derives visible windows and axis markers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportController {
    tuning: ViewportTuning,
}

impl ViewportController {
    #[must_use]
    pub fn new(tuning: ViewportTuning) -> Self {
        Self { tuning }
    }

    #[must_use]
    pub fn tuning(self) -> ViewportTuning {
        self.tuning
    }

    /// Number of whole days visible on each side of `center`.
    ///
    /// Never below one so the resulting window is never degenerate.
    pub fn half_window_days(self, zoom_level: f64, pixel_width: f64) -> TimelineResult<i64> {
        if !pixel_width.is_finite() || pixel_width <= 0.0 {
            return Err(TimelineError::InvalidViewport { pixel_width });
        }
        if !zoom_level.is_finite() || zoom_level <= 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom level must be finite and > 0".to_owned(),
            ));
        }
        let days_visible = pixel_width / (zoom_level * self.tuning.pixel_density);
        let half = (days_visible / 2.0).floor();
        if !half.is_finite() {
            return Err(TimelineError::InvalidData(
                "visible day count must be finite".to_owned(),
            ));
        }
        Ok((half as i64).max(1))
    }

    pub fn compute_window(
        self,
        center: DateTime<Utc>,
        zoom_level: f64,
        pixel_width: f64,
    ) -> TimelineResult<Viewport> {
        let half = self.half_window_days(zoom_level, pixel_width)?;
        let offset = Duration::try_days(half).ok_or_else(|| {
            TimelineError::InvalidData("visible window exceeds representable range".to_owned())
        })?;
        let start = center.checked_sub_signed(offset).ok_or_else(|| {
            TimelineError::InvalidData("window start out of range".to_owned())
        })?;
        let end = center.checked_add_signed(offset).ok_or_else(|| {
            TimelineError::InvalidData("window end out of range".to_owned())
        })?;
        trace!(%start, %end, half_days = half, zoom_level, pixel_width, "compute window");
        Viewport::new(start, end, pixel_width, zoom_level)
    }

    #[must_use]
    pub fn generate_markers(self, viewport: Viewport) -> Vec<AxisMarker> {
        generate_markers(viewport)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{ViewportController, ViewportTuning};

    #[test]
    fn narrow_width_still_yields_two_day_window() {
        let controller = ViewportController::new(ViewportTuning::default());
        let center = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let viewport = controller
            .compute_window(center, 4.0, 10.0)
            .expect("window");
        assert_eq!(viewport.end - viewport.start, Duration::days(2));
    }

    #[test]
    fn zero_width_is_rejected() {
        let controller = ViewportController::default();
        let center = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(controller.compute_window(center, 1.0, 0.0).is_err());
    }
}
