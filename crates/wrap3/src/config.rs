//! The validated settings of a single compile action.

use crate::{DEPENDENCY_PACKAGE, Lang, SOURCE_EXTENSION};
use std::path::{Component, Path, PathBuf};
use wrap3_config::Config;

/// What gets generated after solc ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bindings {
    /// Java wrappers in `package`.
    Java { package: String },
    /// Go bindings in `package`.
    Go { package: String },
    /// Copies of the raw `.bin` and `.abi` artifacts.
    Abi,
}

impl Bindings {
    /// Pairs `lang` with its package, failing if a required package is missing.
    ///
    /// The package is ignored for [`Lang::Abi`].
    pub fn new(lang: Lang, package: Option<String>) -> Result<Self, InvalidConfig> {
        let package = package.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        match (lang, package) {
            (Lang::Java, Some(package)) => Ok(Self::Java { package }),
            (Lang::Go, Some(package)) => Ok(Self::Go { package }),
            (Lang::Abi, package) => {
                if let Some(package) = package {
                    debug!(%package, "ignoring package for raw artifacts");
                }
                Ok(Self::Abi)
            }
            (lang, None) => Err(InvalidConfig::MissingPackage(lang)),
        }
    }

    /// The language of the bindings.
    pub const fn lang(&self) -> Lang {
        match self {
            Self::Java { .. } => Lang::Java,
            Self::Go { .. } => Lang::Go,
            Self::Abi => Lang::Abi,
        }
    }

    /// The package the bindings are generated into, if any.
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Java { package } | Self::Go { package } => Some(package),
            Self::Abi => None,
        }
    }
}

/// Errors raised while validating a [`CompileConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("`--package` is required to generate {0} bindings")]
    MissingPackage(Lang),
    #[error("the target contract name must not be empty")]
    EmptyTarget,
    #[error(
        "refusing to use {workspace:?} as scratch workspace: it contains {contains:?}, \
         which would be deleted"
    )]
    UnsafeWorkspace { workspace: PathBuf, contains: PathBuf },
    #[error(
        "refusing to use {workspace:?} as scratch workspace: it is inside {input:?}, \
         which is copied into it"
    )]
    NestedWorkspace { workspace: PathBuf, input: PathBuf },
}

/// Everything a compile action needs, validated once and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct CompileConfig {
    bindings: Bindings,
    target: String,
    config: Config,
}

impl CompileConfig {
    /// Validates the inputs of a compile action.
    ///
    /// `target` is the contract name without extension; a trailing `.sol` is stripped.
    pub fn new(
        lang: Lang,
        target: &str,
        package: Option<String>,
        config: Config,
    ) -> Result<Self, InvalidConfig> {
        let target = normalize_target(target)?;
        let bindings = Bindings::new(lang, package)?;
        check_workspace(&config)?;
        Ok(Self { bindings, target, config })
    }

    /// The language to generate.
    pub fn lang(&self) -> Lang {
        self.bindings.lang()
    }

    /// The generation step to run after compiling.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The name of the contract to compile.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Paths and tool binaries.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Strips a `.sol` extension and surrounding whitespace from a contract name.
pub fn normalize_target(target: &str) -> Result<String, InvalidConfig> {
    let trimmed = target.trim();
    let name = match trimmed.strip_suffix(SOURCE_EXTENSION) {
        Some(name) => {
            warn!("contract names are given without extension, using `{name}` for `{trimmed}`");
            name
        }
        None => trimmed,
    };
    if name.is_empty() {
        return Err(InvalidConfig::EmptyTarget);
    }
    Ok(name.to_string())
}

/// The workspace is wiped before and after every compile: it must not hold the root, an input
/// or the output, and must not lie inside a folder that is copied into it.
fn check_workspace(config: &Config) -> Result<(), InvalidConfig> {
    let workspace = normalize(&config.workspace_path());
    let kept = [
        config.root.clone(),
        config.contracts_path(),
        config.node_modules_path(),
        config.output_path(),
    ];
    if let Some(contains) =
        kept.iter().map(|path| normalize(path)).find(|path| path.starts_with(&workspace))
    {
        return Err(InvalidConfig::UnsafeWorkspace { workspace, contains });
    }

    let copied = [config.contracts_path(), config.node_modules_path().join(DEPENDENCY_PACKAGE)];
    if let Some(input) =
        copied.iter().map(|path| normalize(path)).find(|path| workspace.starts_with(path))
    {
        return Err(InvalidConfig::NestedWorkspace { workspace, input });
    }
    Ok(())
}

/// Lexically resolves `.` and `..` components, so `<root>/contracts/..` compares equal to
/// `<root>`.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            component => normalized.push(component),
        }
    }
    normalized
}
