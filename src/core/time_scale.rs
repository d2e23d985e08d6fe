use chrono::{DateTime, Utc};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::{LinearScale, Viewport};

/// Bidirectional mapping between instants and horizontal pixel offsets of one
/// viewport.
///
/// `forward` is exact in floating point; `inverse` rounds to the nearest
/// millisecond because instants carry millisecond precision on this axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    viewport: Viewport,
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let linear = LinearScale::new(
            datetime_to_unix_millis(viewport.start),
            datetime_to_unix_millis(viewport.end),
            viewport.pixel_width,
        );
        Self { viewport, linear }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Pixel offset of `time` relative to the viewport's left edge.
    #[must_use]
    pub fn forward(self, time: DateTime<Utc>) -> f64 {
        self.linear.domain_to_pixel(datetime_to_unix_millis(time))
    }

    /// Instant at pixel offset `x`; a zero-width viewport yields its start.
    #[must_use]
    pub fn inverse(self, x: f64) -> DateTime<Utc> {
        unix_millis_to_datetime(self.linear.pixel_to_domain(x))
    }

    /// Unrounded inverse, in epoch milliseconds.
    #[must_use]
    pub fn inverse_millis(self, x: f64) -> f64 {
        self.linear.pixel_to_domain(x)
    }

    #[must_use]
    pub fn pixels_per_day(self) -> f64 {
        let millis_per_pixel = self.linear.domain_per_pixel();
        if millis_per_pixel <= 0.0 {
            return 0.0;
        }
        crate::core::primitives::MILLIS_PER_DAY / millis_per_pixel
    }
}
