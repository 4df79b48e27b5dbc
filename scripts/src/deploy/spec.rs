//! Deployment plan entries and their per-resource results

use alloy::{dyn_abi::DynSolValue, primitives::Address};

use crate::errors::DeploymentError;

/// A single resource to deploy: the contract name and its constructor arguments
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentSpec {
    /// Name of the contract, as registered in the compilation artifacts
    pub name: String,
    /// Constructor arguments, in declaration order
    pub constructor_args: Vec<DynSolValue>,
}

impl DeploymentSpec {
    /// Create a spec with the given constructor arguments
    pub fn new(name: impl Into<String>, constructor_args: Vec<DynSolValue>) -> Self {
        Self { name: name.into(), constructor_args }
    }

    /// Create a spec for a contract with an empty constructor
    pub fn without_args(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Outcome of one attempted deployment
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentResult {
    /// The plan entry that was attempted
    pub spec: DeploymentSpec,
    /// Deployed address, or the backend failure
    pub outcome: Result<Address, DeploymentError>,
}

impl DeploymentResult {
    /// Whether the resource is live
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The deployed address, if any
    pub fn address(&self) -> Option<Address> {
        self.outcome.as_ref().ok().copied()
    }

    /// The backend failure, if any
    pub fn error(&self) -> Option<&DeploymentError> {
        self.outcome.as_ref().err()
    }
}
