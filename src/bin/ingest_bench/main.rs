mod app;
mod commands;
mod context;
mod formatters;

use std::process::ExitCode;

fn main() -> ExitCode {
    app::run()
}
