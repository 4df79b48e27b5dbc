use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::info;

use crate::{errors::ScriptError, utils::command_success_or};

/// Runs the Hardhat toolchain of the contracts project
pub struct HardhatCompiler {
    /// Directory holding `hardhat.config.js`
    project_root: PathBuf,
}

impl HardhatCompiler {
    /// Compiler for the project at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self { project_root: project_root.into() }
    }

    /// Compile every contract, refreshing the artifacts directory
    pub fn compile(&self) -> Result<(), ScriptError> {
        if !self.project_root.is_dir() {
            return Err(ScriptError::ContractCompilation(format!(
                "project root {} not found",
                self.project_root.display()
            )));
        }

        info!("Compiling contracts in {}...", self.project_root.display());
        command_success_or(self.compile_command(), "Failed to compile contracts with hardhat")
    }

    /// The `npx hardhat compile` invocation
    fn compile_command(&self) -> Command {
        let mut compile_cmd = Command::new("npx");
        // Keep stdout for the deployment lines
        compile_cmd.stdout(Stdio::null()).stderr(Stdio::inherit());
        compile_cmd.current_dir(&self.project_root);
        compile_cmd.args("hardhat compile".split_whitespace());
        compile_cmd
    }
}
