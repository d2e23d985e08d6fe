use crate::core::AxisMarker;
use crate::error::TimelineResult;
use crate::extensions::PluginEvent;
use crate::layout::TimelineLayout;
use crate::render::{
    AxisLabelPrimitive, AxisTickPrimitive, Renderer, StepBarPrimitive, TimelineFrame,
};

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Lays out, materializes and renders one frame.
    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    pub fn build_frame(&mut self) -> TimelineResult<TimelineFrame> {
        let layout = self.compute_layout()?;
        let markers = self.generate_markers();
        let mut frame = TimelineFrame::new(self.viewport, layout.content_height);
        self.push_axis(&mut frame, &markers, layout.content_height);
        self.push_bars(&mut frame, &layout);
        Ok(frame)
    }

    fn push_axis(&self, frame: &mut TimelineFrame, markers: &[AxisMarker], bottom: f64) {
        let theme = self.theme;
        let label_y = self.layout_config.padding_top / 2.0;
        for marker in markers {
            frame.ticks.push(AxisTickPrimitive {
                x: marker.x,
                y_top: 0.0,
                y_bottom: bottom,
                is_major: marker.is_major,
                color: if marker.is_major {
                    theme.major_tick
                } else {
                    theme.minor_tick
                },
            });
            frame.labels.push(AxisLabelPrimitive {
                text: marker.label.clone(),
                x: marker.x,
                y: label_y,
                font_size_px: theme.label_font_size_px,
                color: theme.label,
            });
        }
    }

    fn push_bars(&self, frame: &mut TimelineFrame, layout: &TimelineLayout) {
        for (id, rect) in &layout.rects {
            frame.bars.push(StepBarPrimitive {
                step_id: id.clone(),
                label: self.steps.get(id).and_then(|step| step.label.clone()),
                x: rect.left,
                y: rect.top,
                width: rect.width,
                height: rect.height,
                fill: self.theme.step_fill,
                is_preview: false,
            });
        }

        let Some(state) = self.edit.state() else {
            return;
        };
        let Some(preview) = state.preview_rect else {
            return;
        };
        frame.bars.push(StepBarPrimitive {
            step_id: state.step_id.clone(),
            label: None,
            x: preview.left,
            y: preview.top,
            width: preview.width,
            height: preview.height,
            fill: self.theme.preview_fill,
            is_preview: true,
        });
    }
}
