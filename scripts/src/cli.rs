//! Definitions of CLI arguments for the deploy script

use std::{path::PathBuf, time::Duration};

use clap::{builder::BoolishValueParser, ArgAction, Parser};
use tracing::{error, info};

use crate::{
    commands::deploy_contracts,
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        DEFAULT_RPC,
    },
    deploy::{DeploymentResult, RunOutcome},
    errors::ScriptError,
    tx::client::create_rpc_provider,
};

/// Deploy the Nalnda token and marketplace factory contracts.
///
/// Every option falls back to an environment variable, so the script runs without flags once
/// `PRIVATE_KEY` is set (a `.env` file works too).
#[derive(Parser, Debug)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Deployment options
    #[command(flatten)]
    pub deploy: DeployContractsArgs,
}

impl Cli {
    /// Run the deployment
    pub async fn run(self) -> Result<RunOutcome, ScriptError> {
        // Build our RPC client with signer
        let client = create_rpc_provider(&self.rpc_url, &self.priv_key).await?;

        info!("Deploying contracts...");
        deploy_contracts(&self.deploy, client).await
    }
}

/// Exit status for a command line clap could not turn into a [`Cli`].
///
/// `--help` and `--version` are reported through the same error path but are not failures.
pub fn parse_failure_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Report the end of a run on stderr, returning the process exit status
pub fn report(result: Result<Vec<DeploymentResult>, ScriptError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("Deployment aborted");
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Deploy contracts
#[derive(clap::Args, Debug, Clone)]
pub struct DeployContractsArgs {
    /// Root of the Hardhat project
    #[arg(long, env = "PROJECT_ROOT", default_value = ".")]
    pub project_root: PathBuf,

    /// Hardhat artifacts directory, defaults to `<project-root>/artifacts`
    #[arg(long, env = "ARTIFACTS_DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Run `hardhat compile` before deploying
    #[arg(long, env = "COMPILE", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub compile: bool,

    /// Confirmations to wait for on each deployment
    #[arg(long, env = "CONFIRMATIONS", default_value_t = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Seconds to wait for each deployment to be confirmed
    #[arg(long, env = "CONFIRMATION_TIMEOUT_SECS", default_value_t = DEFAULT_CONFIRMATION_TIMEOUT_SECS)]
    pub confirmation_timeout: u64,
}

impl DeployContractsArgs {
    /// Where the compiled artifacts are read from
    pub fn artifacts_dir(&self) -> PathBuf {
        self.artifacts_dir
            .clone()
            .unwrap_or_else(|| self.project_root.join(DEFAULT_ARTIFACTS_DIR))
    }

    /// Receipt wait bound
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn defaults_only_need_a_key() {
        let cli = Cli::try_parse_from(["deploy", "--priv-key", "0x01"]).unwrap();

        assert_eq!(cli.deploy.artifacts_dir(), PathBuf::from("./artifacts"));
        assert_eq!(cli.deploy.confirmation_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn explicit_artifacts_dir_wins() {
        let cli = Cli::try_parse_from([
            "deploy",
            "--priv-key",
            "0x01",
            "--project-root",
            "contracts",
            "--artifacts-dir",
            "out",
            "--compile",
        ])
        .unwrap();

        assert_eq!(cli.deploy.artifacts_dir(), PathBuf::from("out"));
        assert!(cli.deploy.compile);
    }

    #[test]
    fn compile_accepts_numeric_env_value() {
        env::set_var("COMPILE", "1");
        let parsed = Cli::try_parse_from(["deploy", "--priv-key", "0x01"]);
        env::remove_var("COMPILE");

        assert!(parsed.unwrap().deploy.compile);
    }

    #[test]
    fn bad_arguments_exit_with_one() {
        let err = Cli::try_parse_from(["deploy", "--priv-key", "0x01", "--confirmations", "many"])
            .unwrap_err();

        assert_eq!(parse_failure_status(&err), 1);
    }

    #[test]
    fn help_exits_with_zero() {
        let err = Cli::try_parse_from(["deploy", "--help"]).unwrap_err();

        assert_eq!(parse_failure_status(&err), 0);
    }

    #[test]
    fn any_failure_exits_with_one() {
        assert_eq!(report(Ok(Vec::new())), 0);
        assert_eq!(report(Err(ScriptError::EmptyPlan)), 1);
        assert_eq!(
            report(Err(ScriptError::ClientInitialization(String::from("invalid private key")))),
            1
        );
    }
}
