//! Minimal terminal runtime for the playback screen.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event_loop;
mod runtime;
