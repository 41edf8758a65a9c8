use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{event_log_display::*, field_display::*, stats_display::*};

mod event_log_display;
mod field_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const RED: Color = Color::Rgb(220, 0, 0);
    pub const BLUE: Color = Color::Rgb(40, 80, 220);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HINT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const UNVISITED: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const CURRENT: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const CLEARED: Style = fg_bg(color::WHITE, color::DARK_GRAY);
    pub const DISARMED: Style = fg_bg(color::BLACK, color::GREEN);
    pub const SHIELDED: Style = fg_bg(color::WHITE, color::BLUE);
    pub const CASUALTIES: Style = fg_bg(color::WHITE, color::RED);

    pub const PLAYING_BORDER: Color = color::WHITE;
    pub const PAUSED_BORDER: Color = color::YELLOW;
    pub const FINISHED_BORDER: Color = color::GREEN;
    pub const PAUSED_POPUP: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const FINISHED_POPUP: Style = fg_bg(color::WHITE, color::MAGENTA);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
