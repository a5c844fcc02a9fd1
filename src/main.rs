use shard_report::cli;
use shard_report::infra::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli_args = cli::parse_args();

    if let Err(e) = init_logging(cli_args.verbose) {
        eprintln!("Warning: {e}");
    }

    // Process the command
    match cli::process_command(cli_args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
