//! The capability the runner deploys through

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use async_trait::async_trait;

use crate::errors::DeploymentError;

/// Something able to deploy a named contract and wait until it is live.
///
/// `deploy` only resolves once the backend considers the contract confirmed;
/// any timeout policy lives in the implementation.
#[async_trait]
pub trait DeploymentBackend: Send + Sync {
    /// Deploy `name` with the given constructor arguments, returning its address
    async fn deploy(
        &self,
        name: &str,
        constructor_args: &[DynSolValue],
    ) -> Result<Address, DeploymentError>;
}
