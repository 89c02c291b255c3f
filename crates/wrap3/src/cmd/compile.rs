use super::Cmd;
use crate::{
    CompileConfig, Lang, Workspace, imports,
    tools::{ProcessRunner, ToolRunner, Toolchain},
};
use clap::{Parser, builder::NonEmptyStringValueParser};
use eyre::{Result, WrapErr};
use serde::Serialize;
use std::path::PathBuf;
use wrap3_cli::p_println;
use wrap3_config::{
    Config,
    figment::{
        self, Metadata, Profile, Provider,
        error::Kind::InvalidType,
        value::{Dict, Map, Value},
    },
};
use yansi::Paint;

/// CLI arguments for `wrap3 compile`.
///
/// Path and tool arguments are only serialized when given, so they override the values of
/// `wrap3.toml` and the `WRAP3_*` environment without resetting them to defaults.
#[derive(Clone, Debug, Parser, Serialize)]
#[command(about = "Compile a contract and generate bindings for it", long_about = None)]
pub struct CompileArgs {
    /// The kind of output to generate: java, go or abi.
    #[arg(long, short, value_name = "LANG")]
    #[serde(skip)]
    pub lang: Lang,

    /// The name of the contract to compile, without `.sol`.
    #[arg(long, short, value_name = "CONTRACT", value_parser = NonEmptyStringValueParser::new())]
    #[serde(skip)]
    pub target: String,

    /// The package of the generated Java or Go code.
    #[arg(
        long,
        short,
        value_name = "PACKAGE",
        value_parser = NonEmptyStringValueParser::new(),
        required_if_eq_any([("lang", "java"), ("lang", "go")])
    )]
    #[serde(skip)]
    pub package: Option<String>,

    /// The folder containing the contracts.
    ///
    /// [default: ./contracts]
    #[arg(long, short, visible_alias = "contract-folder", value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracts: Option<PathBuf>,

    /// The node modules folder containing `@openzeppelin`.
    ///
    /// [default: ./node_modules]
    #[arg(long = "node", short, visible_alias = "node-module-folder", value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_modules: Option<PathBuf>,

    /// The folder the generated code is written to.
    ///
    /// [default: ./wrap3]
    #[arg(long, short, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// The project root, relative paths are resolved against it.
    ///
    /// [default: the current directory]
    #[arg(long, value_name = "PATH")]
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// The solc binary.
    #[arg(long, value_name = "PATH", help_heading = "Tools")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solc: Option<PathBuf>,

    /// The web3j binary.
    #[arg(long, value_name = "PATH", help_heading = "Tools")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web3j: Option<PathBuf>,

    /// The abigen binary.
    #[arg(long, value_name = "PATH", help_heading = "Tools")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abigen: Option<PathBuf>,

    /// Do not print status messages.
    #[arg(long, short)]
    #[serde(skip)]
    pub quiet: bool,
}

impl CompileArgs {
    /// Resolves the project root and loads the validated config of this action.
    pub fn compile_config(&self) -> Result<CompileConfig> {
        let root = match &self.root {
            Some(root) => dunce::canonicalize(root)
                .wrap_err_with(|| format!("failed to resolve the project root {root:?}"))?,
            None => std::env::current_dir().wrap_err("failed to resolve the current directory")?,
        };
        let figment = Config::figment_with_root(&root).merge(self);
        let config = Config::try_from_figment(figment, root)?;
        trace!(?config, "loaded config");
        Ok(CompileConfig::new(self.lang, &self.target, self.package.clone(), config)?)
    }
}

impl Cmd for CompileArgs {
    type Output = Vec<PathBuf>;

    fn run(self) -> Result<Self::Output> {
        let config = self.compile_config()?;
        let generated = compile(&config, ProcessRunner, self.quiet)?;
        let output = config.config().output_path();
        p_println!(!self.quiet => "Bindings have been generated to {}", output.display());
        Ok(generated)
    }
}

impl Provider for CompileArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named("Compile Args Provider")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let value = Value::serialize(self)?;
        let error = InvalidType(value.to_actual(), "map".into());
        let dict = value.into_dict().ok_or(error)?;
        Ok(Map::from([(Profile::Default, dict)]))
    }
}

/// Runs one compile action: stages the sources in a fresh workspace, compiles the target and
/// generates its bindings.
///
/// The workspace is removed before this returns, on success and on failure.
pub fn compile<R: ToolRunner>(
    config: &CompileConfig,
    runner: R,
    quiet: bool,
) -> Result<Vec<PathBuf>> {
    let paths = config.config();
    let workspace = Workspace::create(paths.workspace_path())
        .wrap_err("failed to create the scratch workspace")?;

    let contracts = workspace.copy_contract_folder(&paths.contracts_path())?;
    let dependencies = workspace.copy_dependency_package(&paths.node_modules_path())?;
    debug!(contracts, dependencies, "staged sources");
    imports::rewrite_imports(&workspace.contracts_dir())?;

    let toolchain = Toolchain::new(config, &workspace, runner);
    toolchain.compile()?;
    p_println!(!quiet => "{}", "Compiler run successful!".green());

    let generated = toolchain.generate()?;
    debug!(target = config.target(), ?generated, "generated bindings");
    Ok(generated)
}
