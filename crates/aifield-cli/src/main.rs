mod command;
mod setup;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
