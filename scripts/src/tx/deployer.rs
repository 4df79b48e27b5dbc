use std::{future::IntoFuture, time::Duration};

use alloy::{
    dyn_abi::DynSolValue,
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::{Provider, WalletProvider},
    rpc::types::eth::TransactionRequest,
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;
use tokio::time;
use tracing::{info, warn};

use crate::{
    constants::{DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRMATION_TIMEOUT_SECS},
    deploy::{ArtifactStore, DeploymentBackend},
    errors::DeploymentError,
    tx::client::RpcProvider,
};

/// Deploys Hardhat-compiled contracts through an alloy provider
pub struct AlloyBackend {
    /// Signing client used to send the creation transactions
    client: RpcProvider,
    /// Where the creation bytecode comes from
    artifacts: ArtifactStore,
    /// Blocks to wait on top of the inclusion block
    confirmations: u64,
    /// Upper bound on each RPC call, the receipt wait included
    confirmation_timeout: Duration,
}

impl AlloyBackend {
    /// Create a backend with the default confirmation policy
    pub fn new(client: RpcProvider, artifacts: ArtifactStore) -> Self {
        Self {
            client,
            artifacts,
            confirmations: DEFAULT_CONFIRMATIONS,
            confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
        }
    }

    /// Number of confirmations to wait for
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    /// Give up on a receipt after `timeout`
    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Predict the address of the next contract created by the deployer
    async fn predict_contract_address(&self) -> Result<Address, DeploymentError> {
        let deployer = self.client.default_signer_address();

        let nonce = bounded(
            self.confirmation_timeout,
            self.client.get_transaction_count(deployer),
            || {
                DeploymentError::unavailable(format!(
                    "nonce of {} not fetched after {:?}",
                    deployer, self.confirmation_timeout
                ))
            },
        )
        .await?;

        Ok(deployer.create(nonce))
    }
}

#[async_trait]
impl DeploymentBackend for AlloyBackend {
    async fn deploy(
        &self,
        name: &str,
        constructor_args: &[DynSolValue],
    ) -> Result<Address, DeploymentError> {
        let mut code = self.artifacts.bytecode(name)?.to_vec();
        code.extend(encode_constructor_args(constructor_args));

        let expected_address = self.predict_contract_address().await?;
        info!("Expecting {} at {}", name, expected_address);

        // Build the creation tx
        let tx_request = TransactionRequest::default().with_deploy_code(Bytes::from(code));

        // Send it, the node estimates gas and may refuse here
        let pending_tx = bounded(
            self.confirmation_timeout,
            self.client.send_transaction(tx_request),
            || {
                DeploymentError::unavailable(format!(
                    "node did not accept the {} deployment after {:?}",
                    name, self.confirmation_timeout
                ))
            },
        )
        .await?;
        let tx_hash = *pending_tx.tx_hash();
        info!("Pending {} deployment... {}", name, tx_hash);

        // Wait for the transaction to be confirmed
        let receipt = bounded(
            self.confirmation_timeout,
            pending_tx
                .with_required_confirmations(self.confirmations)
                .get_receipt(),
            || {
                DeploymentError::timeout(format!(
                    "{} deployment {} not confirmed after {:?}",
                    name, tx_hash, self.confirmation_timeout
                ))
            },
        )
        .await?;

        let address = check_receipt(name, tx_hash, receipt.status(), receipt.contract_address)?;

        if address != expected_address {
            warn!("{} landed at {} instead of {}", name, address, expected_address);
        }
        info!("{} deployment done on block: {:?}", name, receipt.block_number);

        Ok(address)
    }
}

/// ABI-encode constructor arguments, to be appended to the creation bytecode
pub fn encode_constructor_args(constructor_args: &[DynSolValue]) -> Vec<u8> {
    if constructor_args.is_empty() {
        return Vec::new();
    }

    DynSolValue::Tuple(constructor_args.to_vec()).abi_encode_params()
}

/// Await an RPC call for at most `limit`, reporting a stall with `on_elapsed`
async fn bounded<F, T>(
    limit: Duration,
    call: F,
    on_elapsed: impl FnOnce() -> DeploymentError,
) -> Result<T, DeploymentError>
where
    F: IntoFuture<Output = Result<T, TransportError>>,
{
    time::timeout(limit, call)
        .await
        .map_err(|_| on_elapsed())?
        .map_err(classify_transport_error)
}

/// The address a creation receipt reports, if the creation succeeded
fn check_receipt(
    name: &str,
    tx_hash: TxHash,
    status: bool,
    contract_address: Option<Address>,
) -> Result<Address, DeploymentError> {
    if !status {
        return Err(DeploymentError::rejected(format!(
            "{name} deployment reverted in {tx_hash}"
        )));
    }

    contract_address.ok_or_else(|| {
        DeploymentError::rejected(format!("receipt of {tx_hash} holds no contract address"))
    })
}

/// A JSON-RPC error response means the node refused the transaction, anything else is transport
fn classify_transport_error(err: TransportError) -> DeploymentError {
    match err {
        RpcError::ErrorResp(payload) => DeploymentError::rejected(payload),
        other => DeploymentError::unavailable(other),
    }
}
