use aifield_engine::SimulationEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// The most recent entries of the event log that fit the area.
#[derive(Debug)]
pub struct EventLogDisplay<'a> {
    events: &'a [SimulationEvent],
    block: Option<BlockWidget<'a>>,
}

impl<'a> EventLogDisplay<'a> {
    pub fn new(events: &'a [SimulationEvent]) -> Self {
        Self {
            events,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for EventLogDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let visible = usize::from(area.height);
        let tail = &self.events[self.events.len().saturating_sub(visible)..];
        for (event, y) in tail.iter().zip(area.top()..area.bottom()) {
            let style = if event.is_moving() {
                style::HINT
            } else {
                style::DEFAULT
            };
            Line::styled(event.to_string(), style).render(Rect { y, height: 1, ..area }, buf);
        }
    }
}
