mod commands;
mod terminal;

use std::process::ExitCode;

use commands::CommandLine;
use terminal::{logging, print};
use tracing::error;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.into_config();

    logging::init(cfg.quiet);
    print::banner(cfg.quiet);

    match commands::run::run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
