use std::io;

use tracing::info;

use crate::{
    build::hardhat::HardhatCompiler,
    cli::DeployContractsArgs,
    constants::DEPLOYMENT_ORDER,
    deploy::{ArtifactStore, DeploymentRunner, DeploymentSpec, RunOutcome},
    errors::ScriptError,
    tx::{client::RpcProvider, deployer::AlloyBackend},
};

/// The contracts to deploy, in order. None of them takes constructor arguments.
pub fn deployment_plan() -> Vec<DeploymentSpec> {
    DEPLOYMENT_ORDER.into_iter().map(DeploymentSpec::without_args).collect()
}

/// Deploy the Nalnda contracts, printing each deployed address on stdout
pub async fn deploy_contracts(
    args: &DeployContractsArgs,
    client: RpcProvider,
) -> Result<RunOutcome, ScriptError> {
    // Build the contracts
    if args.compile {
        HardhatCompiler::new(&args.project_root).compile()?;
        info!("Built with success");
    }

    let backend = AlloyBackend::new(client, ArtifactStore::new(args.artifacts_dir()))
        .with_confirmations(args.confirmations)
        .with_confirmation_timeout(args.confirmation_timeout());

    // Deploy them
    let runner = DeploymentRunner::new(deployment_plan())?;
    let outcome = runner.run(&backend, &mut io::stdout()).await;
    if outcome.is_success() {
        info!("Deployed with success");
    }

    Ok(outcome)
}
