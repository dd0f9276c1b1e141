use bulkfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // The dashboard owns the terminal, so prefer the log file.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args().await {
        eprintln!("bulkfetch error: {:#}", err);
        std::process::exit(1);
    }
}
