use std::time::Duration;

use aifield_engine::{CellOutcome, Simulation};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget as _},
};

use crate::{
    tui::{App, Runtime},
    view::widgets::{EventLogDisplay, FieldDisplay, StatsDisplay, style},
};

const SMALL_BOARD_TICK: Duration = Duration::from_millis(150);
const LARGE_BOARD_TICK: Duration = Duration::from_millis(50);
const SMALL_BOARD_MAX_SIZE: usize = 10;
const EVENT_LOG_HEIGHT: u16 = 8;

fn tick_interval(size: usize) -> Duration {
    if size <= SMALL_BOARD_MAX_SIZE {
        SMALL_BOARD_TICK
    } else {
        LARGE_BOARD_TICK
    }
}

/// Resolves one cell per tick and paints the field as it goes.
#[derive(Debug)]
pub struct PlayApp {
    simulation: Simulation,
    /// Outcome of every visited cell, row-major.
    outcomes: Vec<Option<CellOutcome>>,
    tick: Duration,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(simulation: Simulation) -> Self {
        let size = simulation.board().size();
        Self {
            simulation,
            outcomes: vec![None; size * size],
            tick: tick_interval(size),
            paused: false,
            is_exiting: false,
        }
    }

    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }

    fn step(&mut self) {
        if self.simulation.advance_one().is_none() {
            return;
        }
        let size = self.simulation.board().size();
        if let Some(step) = self.simulation.last_step() {
            let coordinate = step.coordinate;
            self.outcomes[coordinate.x * size + coordinate.y] = Some(step.outcome);
        }
    }

    fn toggle_pause(&mut self, runtime: &mut Runtime) {
        if self.simulation.is_finished() {
            return;
        }
        self.paused = !self.paused;
        runtime.set_tick_interval((!self.paused).then_some(self.tick));
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.tick));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('p') => self.toggle_pause(runtime),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let finished = self.simulation.is_finished();
        let border_style = if finished {
            style::FINISHED_BORDER
        } else if self.paused {
            style::PAUSED_BORDER
        } else {
            style::PLAYING_BORDER
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let field = FieldDisplay::new(self.simulation.board(), &self.outcomes)
            .current(self.simulation.last_step().map(|step| step.coordinate))
            .block(
                Block::bordered()
                    .title(Line::from("MINEFIELD").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(&self.simulation).block(panel("STATS"));
        let log = EventLogDisplay::new(self.simulation.event_log()).block(panel("EVENTS"));

        let help_text = if finished {
            "Controls: q (Quit)"
        } else if self.paused {
            "Controls: p (Resume) | q (Quit)"
        } else {
            "Controls: p (Pause) | q (Quit)"
        };
        let help_text = Text::from(help_text).style(style::HINT).centered();

        let [main_area, log_area, help_area] = Layout::vertical([
            Constraint::Length(u16::max(field.height(), stats.height())),
            Constraint::Length(EVENT_LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [stats_area, field_area] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(field.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_area);
        let [field_area] = Layout::vertical([Constraint::Length(field.height())]).areas(field_area);

        let buf = frame.buffer_mut();
        stats.render(stats_area, buf);
        field.render(field_area, buf);
        log.render(log_area, buf);
        help_text.render(help_area, buf);

        let popup = if finished {
            Some(("FINISHED", style::FINISHED_POPUP))
        } else if self.paused {
            Some(("PAUSED", style::PAUSED_POPUP))
        } else {
            None
        };
        if let Some((text, popup_style)) = popup {
            render_popup(buf, field_area, text, popup_style);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if self.paused {
            return;
        }
        self.step();
        if self.simulation.is_finished() {
            runtime.set_tick_interval(None);
        }
    }
}

fn render_popup(buf: &mut Buffer, area: Rect, text: &'static str, popup_style: Style) {
    let block = Block::new().style(popup_style);
    let text = Text::styled(text, popup_style).centered();
    let area = area.centered(Constraint::Length(area.width), Constraint::Length(3));
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    text.render(inner.centered_vertically(Constraint::Length(1)), buf);
}
