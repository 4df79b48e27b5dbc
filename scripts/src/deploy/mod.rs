//! Sequential deployment of an ordered contract plan

pub mod artifacts;
pub mod backend;
pub mod runner;
pub mod spec;

pub use artifacts::ArtifactStore;
pub use backend::DeploymentBackend;
pub use runner::{DeploymentRunner, RunOutcome, RunState};
pub use spec::{DeploymentResult, DeploymentSpec};
