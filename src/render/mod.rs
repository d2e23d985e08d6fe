mod frame;
mod null_renderer;
mod primitives;

pub use frame::TimelineFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    AxisLabelPrimitive, AxisTickPrimitive, Color, StepBarPrimitive, TimelineTheme,
};

use crate::error::TimelineResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `TimelineFrame`, so drawing code
/// stays isolated from layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()>;
}
