use std::fmt;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::iso_instant;
use crate::error::{TimelineError, TimelineResult};

/// Stable identity of a step as issued by the step collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Time range payload exchanged with the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpan {
    #[serde(with = "iso_instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_instant")]
    pub end: DateTime<Utc>,
}

impl StepSpan {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.end - self.start
    }

    /// Inclusive overlap test; spans that touch at an endpoint overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        !(self.end < other.start || other.end < self.start)
    }
}

/// A time-ranged item placed on the timeline.
///
/// Display attributes are carried through untouched so hosts can round-trip
/// the collaborator payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    #[serde(with = "iso_instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_instant")]
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl Step {
    #[must_use]
    pub fn new(id: impl Into<StepId>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            label: None,
            attributes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn span(&self) -> StepSpan {
        StepSpan::new(self.start, self.end)
    }

    pub fn set_span(&mut self, span: StepSpan) {
        self.start = span.start;
        self.end = span.end;
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.end <= self.start {
            return Err(TimelineError::InvalidInterval {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Visible time window with its pixel width and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub pixel_width: f64,
    pub zoom_level: f64,
}

impl Viewport {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pixel_width: f64,
        zoom_level: f64,
    ) -> TimelineResult<Self> {
        let viewport = Self {
            start,
            end,
            pixel_width,
            zoom_level,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(self) -> TimelineResult<()> {
        if self.start >= self.end {
            return Err(TimelineError::DegenerateViewport {
                start: self.start,
                end: self.end,
            });
        }
        if !self.pixel_width.is_finite() || self.pixel_width <= 0.0 {
            return Err(TimelineError::InvalidViewport {
                pixel_width: self.pixel_width,
            });
        }
        if !self.zoom_level.is_finite() || self.zoom_level <= 0.0 {
            return Err(TimelineError::InvalidData(
                "viewport zoom level must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn span(self) -> StepSpan {
        StepSpan::new(self.start, self.end)
    }

    #[must_use]
    pub fn span_days(self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / super::primitives::MILLIS_PER_DAY
    }

    #[must_use]
    pub fn contains_span(self, span: StepSpan) -> bool {
        self.span().overlaps(span)
    }
}

/// Pixel geometry of one laid-out step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, width: f64, top: f64, height: f64) -> Self {
        Self {
            left,
            width,
            top,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.top + self.height
    }
}
