use crate::core::StepId;
use crate::error::{TimelineError, TimelineResult};

fn ensure_finite(what: &str, value: f64) -> TimelineResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    Err(TimelineError::InvalidData(format!("{what} must be finite")))
}

fn ensure_positive(what: &str, value: f64) -> TimelineResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(TimelineError::InvalidData(format!(
        "{what} must be finite and > 0"
    )))
}

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn validate(self) -> TimelineResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels
            .iter()
            .all(|value| value.is_finite() && (0.0..=1.0).contains(value))
        {
            return Ok(());
        }
        Err(TimelineError::InvalidData(
            "color channels must be finite and in [0, 1]".to_owned(),
        ))
    }
}

/// Colors and metrics used when materializing a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineTheme {
    pub step_fill: Color,
    pub preview_fill: Color,
    pub minor_tick: Color,
    pub major_tick: Color,
    pub label: Color,
    pub label_font_size_px: f64,
}

impl Default for TimelineTheme {
    fn default() -> Self {
        Self {
            step_fill: Color::rgba(0.23, 0.51, 0.96, 1.0),
            preview_fill: Color::rgba(0.23, 0.51, 0.96, 0.45),
            minor_tick: Color::rgba(0.82, 0.84, 0.86, 1.0),
            major_tick: Color::rgba(0.55, 0.58, 0.62, 1.0),
            label: Color::rgba(0.2, 0.22, 0.25, 1.0),
            label_font_size_px: 11.0,
        }
    }
}

/// Vertical grid line at one axis marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTickPrimitive {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub is_major: bool,
    pub color: Color,
}

impl AxisTickPrimitive {
    pub fn validate(self) -> TimelineResult<()> {
        ensure_finite("tick x", self.x)?;
        ensure_finite("tick top", self.y_top)?;
        ensure_finite("tick bottom", self.y_bottom)?;
        self.color.validate()
    }
}

/// Text centered on an axis marker.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl AxisLabelPrimitive {
    pub fn validate(&self) -> TimelineResult<()> {
        if self.text.is_empty() {
            return Err(TimelineError::InvalidData(
                "axis label must not be empty".to_owned(),
            ));
        }
        ensure_finite("label x", self.x)?;
        ensure_finite("label y", self.y)?;
        ensure_positive("label font size", self.font_size_px)?;
        self.color.validate()
    }
}

/// One step bar, or the ephemeral drag/resize preview of one.
#[derive(Debug, Clone, PartialEq)]
pub struct StepBarPrimitive {
    pub step_id: StepId,
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub is_preview: bool,
}

impl StepBarPrimitive {
    pub fn validate(&self) -> TimelineResult<()> {
        ensure_finite("step bar x", self.x)?;
        ensure_finite("step bar y", self.y)?;
        ensure_positive("step bar width", self.width)?;
        ensure_positive("step bar height", self.height)?;
        self.fill.validate()
    }
}
