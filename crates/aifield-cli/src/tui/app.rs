use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// A screen driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event, e.g. to set the tick interval.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Called on every tick.
    fn update(&mut self, runtime: &mut Runtime);
}
