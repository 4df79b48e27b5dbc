use std::{io, process::ExitCode};

use clap::Parser;
use dotenv::dotenv;
use nalnda_scripts::{
    cli::{parse_failure_status, report, Cli},
    deploy::RunOutcome,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_failure_status(&e));
        }
    };

    // Logs go to stderr, stdout only carries the deployed addresses
    tracing_subscriber::fmt().pretty().with_writer(io::stderr).init();

    let result = cli.run().await.and_then(RunOutcome::into_result);

    ExitCode::from(report(result))
}
