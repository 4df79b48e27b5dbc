//! Utilities for the deploy scripts.

use std::process::Command;

use tracing::debug;

use crate::errors::ScriptError;

/// Executes a command, returning an error if the command fails
pub fn command_success_or(mut cmd: Command, err_msg: &str) -> Result<(), ScriptError> {
    debug!("Running command: {:?}", cmd);
    if !cmd
        .status()
        .map_err(|e| ScriptError::ContractCompilation(format!("{err_msg}: {e}")))?
        .success()
    {
        Err(ScriptError::ContractCompilation(String::from(err_msg)))
    } else {
        Ok(())
    }
}
