use crate::core::Viewport;
use crate::error::TimelineResult;
use crate::render::{AxisLabelPrimitive, AxisTickPrimitive, StepBarPrimitive};

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub viewport: Viewport,
    pub content_height: f64,
    pub ticks: Vec<AxisTickPrimitive>,
    pub labels: Vec<AxisLabelPrimitive>,
    pub bars: Vec<StepBarPrimitive>,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(viewport: Viewport, content_height: f64) -> Self {
        Self {
            viewport,
            content_height,
            ticks: Vec::new(),
            labels: Vec::new(),
            bars: Vec::new(),
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.viewport.validate()?;
        for tick in &self.ticks {
            tick.validate()?;
        }
        for label in &self.labels {
            label.validate()?;
        }
        for bar in &self.bars {
            bar.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn preview_bar(&self) -> Option<&StepBarPrimitive> {
        self.bars.iter().find(|bar| bar.is_preview)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty() && self.labels.is_empty() && self.bars.is_empty()
    }
}
