//! Definitions of errors that can occur during the execution of the deploy scripts

use thiserror::Error;

/// Errors reported by a deployment backend for a single resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeploymentError {
    /// The backend could not be reached
    #[error("backend unavailable: {reason}")]
    BackendUnavailable {
        /// What went wrong while talking to the backend
        reason: String,
    },
    /// The resource has no compiled definition
    #[error("artifact missing: {reason}")]
    ArtifactMissing {
        /// Why the artifact could not be used
        reason: String,
    },
    /// The deployment was submitted but never confirmed
    #[error("confirmation timed out: {reason}")]
    ConfirmationTimeout {
        /// Details about the pending submission
        reason: String,
    },
    /// The backend explicitly refused the deployment
    #[error("deployment rejected: {reason}")]
    DeploymentRejected {
        /// Rejection cause, e.g. an execution revert
        reason: String,
    },
}

impl DeploymentError {
    /// Build a [`DeploymentError::BackendUnavailable`]
    pub fn unavailable(reason: impl ToString) -> Self {
        Self::BackendUnavailable { reason: reason.to_string() }
    }

    /// Build a [`DeploymentError::ArtifactMissing`]
    pub fn artifact_missing(reason: impl ToString) -> Self {
        Self::ArtifactMissing { reason: reason.to_string() }
    }

    /// Build a [`DeploymentError::ConfirmationTimeout`]
    pub fn timeout(reason: impl ToString) -> Self {
        Self::ConfirmationTimeout { reason: reason.to_string() }
    }

    /// Build a [`DeploymentError::DeploymentRejected`]
    pub fn rejected(reason: impl ToString) -> Self {
        Self::DeploymentRejected { reason: reason.to_string() }
    }
}

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Error when creating the client
    #[error("error during client init: {0}")]
    ClientInitialization(String),
    /// Error compiling the contracts
    #[error("error compiling contracts: {0}")]
    ContractCompilation(String),
    /// A deployment plan without any contract
    #[error("deployment plan is empty")]
    EmptyPlan,
    /// Error deploying a contract
    #[error("error deploying {name}: {source}")]
    ContractDeployment {
        /// Name of the contract that failed
        name: String,
        /// Backend failure
        source: DeploymentError,
    },
}
