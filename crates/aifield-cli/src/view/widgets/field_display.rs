use aifield_engine::{Board, CellOutcome, Coordinate, Hazard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

const CELL_WIDTH: u16 = 2;

/// The minefield, with every visited cell painted by how it was resolved.
#[derive(Debug)]
pub struct FieldDisplay<'a> {
    board: &'a Board,
    outcomes: &'a [Option<CellOutcome>],
    current: Option<Coordinate>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> FieldDisplay<'a> {
    /// `outcomes` holds one entry per cell in row-major order.
    pub fn new(board: &'a Board, outcomes: &'a [Option<CellOutcome>]) -> Self {
        Self {
            board,
            outcomes,
            current: None,
            block: None,
        }
    }

    pub fn current(self, current: Option<Coordinate>) -> Self {
        Self { current, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn side(&self) -> u16 {
        u16::try_from(self.board.size()).unwrap_or(u16::MAX)
    }

    pub fn width(&self) -> u16 {
        self.side()
            .saturating_mul(CELL_WIDTH)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        self.side()
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

fn hazard_glyph(hazard: Hazard) -> &'static str {
    match hazard {
        Hazard::Empty => ". ",
        Hazard::Mine => "m ",
        Hazard::Bomb => "B ",
    }
}

fn outcome_style(outcome: CellOutcome) -> Style {
    match outcome {
        CellOutcome::Cleared | CellOutcome::LuckyMiss => style::CLEARED,
        CellOutcome::Disarmed | CellOutcome::SapperDisarmed => style::DISARMED,
        CellOutcome::HeavyShielded => style::SHIELDED,
        CellOutcome::HeavyLost | CellOutcome::SapperLost | CellOutcome::Casualties { .. } => {
            style::CASUALTIES
        }
    }
}

impl Widget for FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let size = self.board.size();
        for (row, screen_y) in (0..size).zip(area.top()..area.bottom()) {
            let columns = (0..size).zip((area.left()..area.right()).step_by(CELL_WIDTH.into()));
            for (column, screen_x) in columns {
                let coordinate = Coordinate::new(row, column);
                let (text, style) = match self.outcomes.get(row * size + column).copied().flatten() {
                    Some(outcome) => (
                        hazard_glyph(self.board.hazard_at(coordinate)),
                        outcome_style(outcome),
                    ),
                    None => ("· ", style::UNVISITED),
                };
                let style = if self.current == Some(coordinate) {
                    style::CURRENT
                } else {
                    style
                };
                let width = usize::from((area.right() - screen_x).min(CELL_WIDTH));
                buf.set_stringn(screen_x, screen_y, text, width, style);
            }
        }
    }
}
