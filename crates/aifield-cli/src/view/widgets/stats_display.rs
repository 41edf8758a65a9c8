use std::iter;

use aifield_engine::Simulation;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

pub struct StatsDisplay<'a> {
    simulation: &'a Simulation,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(simulation: &'a Simulation) -> Self {
        Self {
            simulation,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        28 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&Simulation) -> String),
    LabelValue(&'static str, &'static dyn Fn(&Simulation) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("CLASSIFIER:"),
    Row::FullValue(&|sim| sim.classifier_name().to_owned()),
    Row::LabelValue("PATH:", &|sim| sim.path().to_string()),
    Row::LabelValue("CELLS:", &|sim| {
        format!("{}/{}", sim.stats().visited(), sim.total_cells())
    }),
    Row::Empty,
    Row::LabelValue("SOLDIERS:", &|sim| {
        format!("{}/{}", sim.stats().survivors(), sim.stats().headcount())
    }),
    Row::LabelValue("HEAVIES:", &|sim| sim.troops().heavy_count().to_string()),
    Row::LabelValue("SAPPERS:", &|sim| sim.troops().sapper_count().to_string()),
    Row::LabelValue("KITS FOUND:", &|sim| sim.stats().found_kits().to_string()),
    Row::Empty,
    Row::LabelValue("MINES:", &|sim| {
        format!(
            "{}/{}",
            sim.stats().disarmed_mines(),
            sim.board().amount_of_mines()
        )
    }),
    Row::LabelValue("BOMBS:", &|sim| {
        format!(
            "{}/{}",
            sim.stats().disarmed_bombs(),
            sim.board().amount_of_bombs()
        )
    }),
    Row::LabelValue("GOOD GUESSES:", &|sim| {
        sim.stats().good_predictions().to_string()
    }),
    Row::Empty,
    Row::FullLabel("ACCURACY:"),
    Row::FullValue(&|sim| {
        sim.accuracy()
            .map_or_else(|| "-".to_owned(), |accuracy| format!("{:.2}%", accuracy * 100.0))
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.simulation), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.simulation), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
