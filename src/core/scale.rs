/// Linear mapping between a numeric domain and `[0, pixel_width]`.
///
/// Degenerate inputs clamp instead of dividing by zero: a zero-span domain maps
/// every value to pixel `0`, and a zero pixel width maps every pixel to the
/// domain start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_width: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain_start: f64, domain_end: f64, pixel_width: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            pixel_width,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn pixel_width(self) -> f64 {
        self.pixel_width
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if !span.is_finite() || span == 0.0 || !self.pixel_width.is_finite() {
            return 0.0;
        }
        (value - self.domain_start) / span * self.pixel_width
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        if !self.pixel_width.is_finite() || self.pixel_width <= 0.0 || !pixel.is_finite() {
            return self.domain_start;
        }
        let span = self.domain_end - self.domain_start;
        self.domain_start + pixel / self.pixel_width * span
    }

    /// Domain units covered by one pixel.
    #[must_use]
    pub fn domain_per_pixel(self) -> f64 {
        if !self.pixel_width.is_finite() || self.pixel_width <= 0.0 {
            return 0.0;
        }
        (self.domain_end - self.domain_start) / self.pixel_width
    }
}
