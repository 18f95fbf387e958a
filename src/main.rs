//! vstamp binary entry point.

use std::process::ExitCode;

use vstamp::ui::output;

fn main() -> ExitCode {
    match vstamp::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
