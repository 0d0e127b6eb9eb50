use rmf_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("rmf error: {:#}", err);
        std::process::exit(1);
    }
}

/// File logging first; stderr when the state dir is unusable.
pub(crate) fn init_logging(filter: Option<&str>) {
    if let Err(e) = logging::init_logging(filter) {
        logging::init_logging_stderr(filter);
        tracing::warn!("file logging unavailable ({:#}), logging to stderr", e);
    }
}
