use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    Tick,
    Render,
    Crossterm(Event),
}

/// Produces ticks at a fixed interval and a render after every state change.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true,
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick is due, a render is pending or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(next_tick) = self.next_tick_at()
                && now >= next_tick
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(next_tick) = self.next_tick_at()
                && !event::poll(next_tick.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn next_tick_at(&self) -> Option<Instant> {
        self.tick_interval.map(|interval| self.last_tick + interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::default();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_due_tick_comes_first() {
        let mut events = EventLoop::default();
        events.set_tick_interval(Some(Duration::ZERO));
        assert!(events.next().unwrap().is_tick());
        assert!(events.next().unwrap().is_tick());
        events.set_tick_interval(None);
        assert!(events.next().unwrap().is_render());
    }
}
