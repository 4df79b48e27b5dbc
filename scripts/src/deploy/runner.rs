//! Sequential execution of a deployment plan

use std::io::Write;

use tracing::{debug, error, info, warn};

use crate::{
    deploy::{
        backend::DeploymentBackend,
        spec::{DeploymentResult, DeploymentSpec},
    },
    errors::ScriptError,
};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing attempted yet
    NotStarted,
    /// Deploying the plan, one spec at a time
    Running,
    /// Every spec was deployed
    Completed,
    /// A spec failed, the rest of the plan was skipped
    Failed,
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Results of the attempted specs, in plan order
    pub results: Vec<DeploymentResult>,
    /// Terminal state of the run
    pub state: RunState,
}

impl RunOutcome {
    /// True iff every attempted spec succeeded and the run completed
    pub fn is_success(&self) -> bool {
        self.state == RunState::Completed && self.results.iter().all(DeploymentResult::is_success)
    }

    /// The result that stopped the run, if any
    pub fn failure(&self) -> Option<&DeploymentResult> {
        self.results.iter().find(|result| !result.is_success())
    }

    /// Process exit status for this outcome
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Turn a failed run into the error that stopped it
    pub fn into_result(self) -> Result<Vec<DeploymentResult>, ScriptError> {
        if let Some(DeploymentResult { spec, outcome: Err(err) }) = self.failure() {
            return Err(ScriptError::ContractDeployment {
                name: spec.name.clone(),
                source: err.clone(),
            });
        }

        Ok(self.results)
    }
}

/// Deploys an ordered plan of contracts, stopping at the first failure
#[derive(Debug, Clone)]
pub struct DeploymentRunner {
    /// The plan, never empty
    specs: Vec<DeploymentSpec>,
}

impl DeploymentRunner {
    /// Build a runner over a non-empty plan
    pub fn new(specs: Vec<DeploymentSpec>) -> Result<Self, ScriptError> {
        if specs.is_empty() {
            return Err(ScriptError::EmptyPlan);
        }

        Ok(Self { specs })
    }

    /// Run the plan against `backend`, writing one progress line per deployed contract to `out`.
    ///
    /// Each deployment is awaited until confirmed before the next one is submitted. Already
    /// deployed contracts are left in place when a later one fails.
    pub async fn run<B, W>(&self, backend: &B, out: &mut W) -> RunOutcome
    where
        B: DeploymentBackend + ?Sized,
        W: Write,
    {
        let mut state = RunState::NotStarted;
        let mut results = Vec::with_capacity(self.specs.len());

        transition(&mut state, RunState::Running);
        for spec in &self.specs {
            info!("Deploying {}...", spec.name);
            let outcome = backend.deploy(&spec.name, &spec.constructor_args).await;

            match &outcome {
                Ok(address) => {
                    info!("{} live at {}", spec.name, address);
                    if let Err(e) = writeln!(out, "{} deployed to: {}", spec.name, address) {
                        warn!("could not write progress line: {}", e);
                    }
                }
                Err(e) => error!("Failed to deploy {}: {}", spec.name, e),
            }

            let failed = outcome.is_err();
            results.push(DeploymentResult { spec: spec.clone(), outcome });
            if failed {
                transition(&mut state, RunState::Failed);
                return RunOutcome { results, state };
            }
        }
        transition(&mut state, RunState::Completed);

        RunOutcome { results, state }
    }
}

/// Move the run to its next state
fn transition(state: &mut RunState, next: RunState) {
    debug!("run state {:?} -> {:?}", state, next);
    *state = next;
}
