//! thaw - restore S3 Deep Archive objects in bulk
//!
//! Scans an S3 path and requests a bulk restore for every Deep Archive
//! object that is neither restored nor being restored.

use thaw_cli::cli::{self, Cli, normalize_args};
use thaw_cli::exit_code::ExitCode;
use thaw_cli::output::logging;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also end up here
            let code = if e.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    logging::init(cli.debug);

    let exit_code = cli::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
