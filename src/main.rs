mod app;
mod config;
mod cursor_ctrl;
mod dataset;
mod plot;
mod trace;

use app::FitCursors;
use iced::{application, Result};

fn main() -> Result {
    trace::setup();

    application(FitCursors::title, FitCursors::update, FitCursors::view)
        .antialiasing(true)
        .run_with(FitCursors::create)
}
