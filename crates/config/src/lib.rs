//! # wrap3-config
//!
//! wrap3 configuration.
//!
//! Settings are layered, later layers taking precedence:
//!
//! 1. [`Config::default`]
//! 2. the `wrap3.toml` file in the project root (or the file named by `WRAP3_CONFIG`)
//! 3. `WRAP3_`-prefixed environment variables, e.g. `WRAP3_OUTPUT=./bindings`
//! 4. any additional [`Provider`] merged by the caller, typically command line arguments

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
pub use error::ExtractConfigError;

// Re-exported so downstream crates can implement `Provider` without a direct dependency.
pub use figment;

/// wrap3 configuration.
///
/// All relative paths are resolved against [`Config::root`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The project root. Not part of the serialized configuration.
    #[serde(skip)]
    pub root: PathBuf,
    /// Folder containing the user's `.sol` files.
    pub contracts: PathBuf,
    /// Folder containing the installed node packages, `@openzeppelin` among them.
    pub node_modules: PathBuf,
    /// Folder receiving generated bindings or raw artifacts.
    pub output: PathBuf,
    /// Scratch folder staged for each compile. Deleted when the compile finishes.
    pub workspace: PathBuf,
    /// The Solidity compiler binary.
    pub solc: PathBuf,
    /// The web3j binary used to generate Java wrappers.
    pub web3j: PathBuf,
    /// The abigen binary used to generate Go bindings.
    pub abigen: PathBuf,
}

impl Config {
    /// The default name of the configuration file.
    pub const FILE_NAME: &'static str = "wrap3.toml";

    /// The prefix of environment variables overriding configuration keys.
    pub const ENV_PREFIX: &'static str = "WRAP3_";

    /// Environment variables sharing [`Self::ENV_PREFIX`] that are not configuration keys.
    const IGNORED_ENV_KEYS: &'static [&'static str] = &["CONFIG", "DEBUG"];

    /// Returns the default config rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Default::default() }
    }

    /// Loads the config for the project at `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        let root = root.as_ref();
        Self::try_from_figment(Self::figment_with_root(root), root)
    }

    /// Returns the [`Figment`] combining defaults, the config file and the environment for the
    /// project at `root`.
    ///
    /// Callers can merge further providers on top before extracting:
    ///
    /// ```no_run
    /// use wrap3_config::{figment::providers::Serialized, Config};
    ///
    /// let figment = Config::figment_with_root(".")
    ///     .merge(Serialized::default("output", "./bindings"));
    /// let config = Config::try_from_figment(figment, ".").unwrap();
    /// ```
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let root = root.as_ref();
        let file = Self::config_file(root);
        trace!(?file, "loading config");
        Figment::from(Self::with_root(root))
            .merge(Toml::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(Self::IGNORED_ENV_KEYS))
    }

    /// Extracts a `Config` rooted at `root` from `provider`.
    pub fn try_from_figment<T: Provider>(
        provider: T,
        root: impl Into<PathBuf>,
    ) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.root = root.into();
        Ok(config)
    }

    /// Returns the path of the configuration file for `root`.
    ///
    /// `WRAP3_CONFIG` overrides the default [`Self::FILE_NAME`]; a relative override is
    /// resolved against `root`.
    pub fn config_file(root: &Path) -> PathBuf {
        root.join(Env::var_or("WRAP3_CONFIG", Self::FILE_NAME))
    }

    /// Resolves `path` against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// The folder containing the user's contracts.
    pub fn contracts_path(&self) -> PathBuf {
        self.resolve(&self.contracts)
    }

    /// The folder containing the node packages.
    pub fn node_modules_path(&self) -> PathBuf {
        self.resolve(&self.node_modules)
    }

    /// The output folder.
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    /// The scratch workspace folder.
    pub fn workspace_path(&self) -> PathBuf {
        self.resolve(&self.workspace)
    }

    /// The program to spawn for the Solidity compiler.
    pub fn solc_program(&self) -> PathBuf {
        self.tool_program(&self.solc)
    }

    /// The program to spawn for web3j.
    pub fn web3j_program(&self) -> PathBuf {
        self.tool_program(&self.web3j)
    }

    /// The program to spawn for abigen.
    pub fn abigen_program(&self) -> PathBuf {
        self.tool_program(&self.abigen)
    }

    /// Bare names like `solc` are looked up in `PATH` when spawned and are returned as is,
    /// anything with a directory component is resolved against the root.
    fn tool_program(&self, tool: &Path) -> PathBuf {
        if tool.components().count() > 1 { self.resolve(tool) } else { tool.to_path_buf() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            contracts: "contracts".into(),
            node_modules: "node_modules".into(),
            output: "wrap3".into(),
            workspace: "temp".into(),
            solc: "solc".into(),
            web3j: "web3j".into(),
            abigen: "abigen".into(),
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("wrap3 defaults")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
