use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineFrame};

/// Renderer for tests and headless use; records counts of the last frame.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_bar_count: usize,
    pub last_tick_count: usize,
    pub last_had_preview: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_bar_count = frame.bars.len();
        self.last_tick_count = frame.ticks.len();
        self.last_had_preview = frame.preview_bar().is_some();
        Ok(())
    }
}
