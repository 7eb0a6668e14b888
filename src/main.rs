use std::process::ExitCode;

use cogpipe::cli::{self, Interrupted};
use cogpipe::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<Interrupted>() => {
            output::error(&err);
            ExitCode::from(130)
        }
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
