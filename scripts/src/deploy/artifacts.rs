//! Lookup of compiled contracts in a Hardhat artifacts directory

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;
use tracing::debug;

use crate::errors::DeploymentError;

/// Hardhat mirrors the project's `contracts/` sources here, dependencies live next to it
const SOURCES_DIR: &str = "contracts";

/// Read-only view over the artifacts emitted by `hardhat compile`
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Root of the artifacts tree, usually `<project>/artifacts`
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creation bytecode of the contract `name`
    pub fn bytecode(&self, name: &str) -> Result<Bytes, DeploymentError> {
        let path = self.find(name)?;
        debug!("Using artifact {:?} for {}", path, name);

        let contents = fs::read_to_string(&path)
            .map_err(|e| DeploymentError::artifact_missing(format!("{}: {}", path.display(), e)))?;
        let parsed = json::parse(&contents)
            .map_err(|e| DeploymentError::artifact_missing(format!("{}: {}", path.display(), e)))?;

        parse_bytecode(name, &parsed)
    }

    /// Path of the artifact file describing `name`
    fn find(&self, name: &str) -> Result<PathBuf, DeploymentError> {
        if !self.root.is_dir() {
            return Err(DeploymentError::artifact_missing(format!(
                "artifacts directory {} not found, were the contracts compiled?",
                self.root.display()
            )));
        }

        let sources = self.root.join(SOURCES_DIR);
        let file_name = format!("{name}.json");
        find_file(&sources, &file_name).ok_or_else(|| {
            DeploymentError::artifact_missing(format!(
                "no artifact for {} under {}",
                name,
                sources.display()
            ))
        })
    }
}

/// Depth-first search for `file_name`, visiting entries in name order.
/// Symlinks are not followed.
fn find_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut entries: Vec<(PathBuf, bool)> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            Some((entry.path(), entry.file_type().ok()?.is_dir()))
        })
        .collect();
    entries.sort();

    for (path, is_dir) in entries {
        if is_dir {
            if let Some(found) = find_file(&path, file_name) {
                return Some(found);
            }
        } else if path.file_name().is_some_and(|f| f == file_name) {
            return Some(path);
        }
    }

    None
}

/// Extract the creation bytecode out of a parsed artifact
fn parse_bytecode(name: &str, artifact: &JsonValue) -> Result<Bytes, DeploymentError> {
    if let Some(contract_name) = artifact["contractName"].as_str() {
        if contract_name != name {
            return Err(DeploymentError::artifact_missing(format!(
                "artifact for {name} describes {contract_name}"
            )));
        }
    }

    let raw = artifact["bytecode"].as_str().ok_or_else(|| {
        DeploymentError::artifact_missing(format!("artifact for {name} has no bytecode"))
    })?;
    let code = hex::decode(raw).map_err(|e| {
        DeploymentError::artifact_missing(format!("invalid bytecode for {name}: {e}"))
    })?;

    // Interfaces and abstract contracts compile to "0x"
    if code.is_empty() {
        return Err(DeploymentError::artifact_missing(format!(
            "{name} has no creation bytecode, is it abstract?"
        )));
    }

    Ok(code.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_artifact(root: &Path, source: &str, name: &str, bytecode: &str) {
        let dir = root.join(source);
        fs::create_dir_all(&dir).unwrap();
        let mut artifact = JsonValue::new_object();
        artifact["_format"] = JsonValue::String(String::from("hh-sol-artifact-1"));
        artifact["contractName"] = JsonValue::String(name.to_string());
        artifact["sourceName"] = JsonValue::String(source.to_string());
        artifact["abi"] = JsonValue::new_array();
        artifact["bytecode"] = JsonValue::String(bytecode.to_string());
        fs::write(dir.join(format!("{name}.json")), artifact.dump()).unwrap();
        fs::write(dir.join(format!("{name}.dbg.json")), "{}").unwrap();
    }

    #[test]
    fn reads_bytecode_from_nested_source() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "contracts/PurchaseToken.sol", "NalndaToken", "0x6080604052");

        let store = ArtifactStore::new(tmp.path());

        assert_eq!(
            store.bytecode("NalndaToken").unwrap(),
            Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52])
        );
    }

    #[test]
    fn unknown_contract_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "contracts/NalndaToken.sol", "NalndaToken", "0x6080");

        let err = ArtifactStore::new(tmp.path()).bytecode("MarketplaceFactory").unwrap_err();

        assert!(matches!(err, DeploymentError::ArtifactMissing { .. }));
    }

    #[test]
    fn missing_directory_is_missing_artifact() {
        let tmp = tempfile::tempdir().unwrap();

        let err = ArtifactStore::new(tmp.path().join("artifacts")).bytecode("NalndaToken").unwrap_err();

        assert!(matches!(err, DeploymentError::ArtifactMissing { .. }));
    }

    #[test]
    fn abstract_contract_is_missing_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "contracts/IMarketplace.sol", "IMarketplace", "0x");

        let err = ArtifactStore::new(tmp.path()).bytecode("IMarketplace").unwrap_err();

        assert!(matches!(err, DeploymentError::ArtifactMissing { .. }));
    }

    #[test]
    fn project_sources_win_over_dependencies() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "@openzeppelin/token/NalndaToken.sol", "NalndaToken", "0x00");
        write_artifact(tmp.path(), "contracts/NalndaToken.sol", "NalndaToken", "0x6080");

        let code = ArtifactStore::new(tmp.path()).bytecode("NalndaToken").unwrap();

        assert_eq!(code, Bytes::from(vec![0x60, 0x80]));
    }

    #[test]
    fn artifacts_outside_sources_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "@openzeppelin/token/ERC20.sol", "ERC20", "0x6080");
        let build_info = tmp.path().join("build-info");
        fs::create_dir_all(&build_info).unwrap();
        fs::write(build_info.join("NalndaToken.json"), "{}").unwrap();

        let store = ArtifactStore::new(tmp.path());

        assert!(matches!(store.bytecode("ERC20"), Err(DeploymentError::ArtifactMissing { .. })));
        assert!(matches!(
            store.bytecode("NalndaToken"),
            Err(DeploymentError::ArtifactMissing { .. })
        ));
    }
}
