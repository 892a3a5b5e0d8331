use sricheck_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::parse_or_exit().run() {
        tracing::error!("{:#}", err);
        eprintln!("sricheck error: {:#}", err);
        std::process::exit(1);
    }
}
