//! tick - todo.txt task list with a change journal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ticklist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
