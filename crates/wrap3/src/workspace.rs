//! The scratch directory a compile action stages its inputs in.
//!
//! ```text
//! temp/
//! ├── contracts/          copy of the contract folder
//! │   └── @openzeppelin/  copy of node_modules/@openzeppelin
//! └── artifacts/          solc output, <Name>.bin and <Name>.abi
//! ```

use crate::{DEPENDENCY_PACKAGE, SOURCE_EXTENSION};
use eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};
use wrap3_common::{errors::FsPathError, fs};

/// A freshly created scratch directory, removed again when dropped.
///
/// Holding the guard for the whole compile action makes sure the directory is gone after the
/// action ends, however it ends.
#[derive(Debug)]
#[must_use = "the workspace is removed when dropped"]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Name of the staged contracts subtree.
    pub const CONTRACTS_DIR: &'static str = "contracts";

    /// Name of the compiler output subtree.
    pub const ARTIFACTS_DIR: &'static str = "artifacts";

    /// Removes anything at `root` and creates an empty workspace there.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        remove_workspace(&root)?;
        let workspace = Self { root };
        fs::create_dir_all(workspace.contracts_dir())?;
        fs::create_dir_all(workspace.artifacts_dir())?;
        debug!(root = ?workspace.root, "created workspace");
        Ok(workspace)
    }

    /// The workspace directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The staged contracts.
    pub fn contracts_dir(&self) -> PathBuf {
        self.root.join(Self::CONTRACTS_DIR)
    }

    /// The compiler output.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(Self::ARTIFACTS_DIR)
    }

    /// The staged source file of `contract`.
    pub fn source_file(&self, contract: &str) -> PathBuf {
        self.contracts_dir().join(format!("{contract}{SOURCE_EXTENSION}"))
    }

    /// The bytecode solc emits for `contract`.
    pub fn bin_file(&self, contract: &str) -> PathBuf {
        self.artifacts_dir().join(format!("{contract}.bin"))
    }

    /// The ABI solc emits for `contract`.
    pub fn abi_file(&self, contract: &str) -> PathBuf {
        self.artifacts_dir().join(format!("{contract}.abi"))
    }

    /// Copies the content of the contract folder into the contracts subtree.
    ///
    /// Returns the number of copied files.
    pub fn copy_contract_folder(&self, source: &Path) -> Result<usize> {
        let dest = self.contracts_dir();
        fs::copy_dir_all(source, &dest)
            .wrap_err_with(|| format!("failed to copy folder - from: {source:?} to: {dest:?}"))
    }

    /// Copies `<node_modules>/@openzeppelin` into the contracts subtree under the same name.
    ///
    /// Returns the number of copied files.
    pub fn copy_dependency_package(&self, node_modules: &Path) -> Result<usize> {
        let from = node_modules.join(DEPENDENCY_PACKAGE);
        let to = self.contracts_dir().join(DEPENDENCY_PACKAGE);
        fs::copy_dir_all(&from, &to)
            .wrap_err_with(|| format!("failed to copy folder - from: {from:?} to: {to:?}"))
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match remove_workspace(&self.root) {
            Ok(()) => debug!(root = ?self.root, "removed workspace"),
            Err(err) => warn!(%err, "failed to remove workspace"),
        }
    }
}

/// Recursively deletes the workspace at `root`. Succeeds if there is nothing to delete.
pub fn remove_workspace(root: impl AsRef<Path>) -> Result<(), FsPathError> {
    fs::remove_dir_all(root)
}
