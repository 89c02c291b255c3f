//! Invocations of the external compiler and binding generators.

use crate::{Bindings, CompileConfig, Workspace};
use eyre::{Result, WrapErr};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};
use wrap3_common::{CommandUtils, fs};

/// A program, its arguments and the directory to run it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    current_dir: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` without arguments.
    pub fn new(program: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), current_dir: current_dir.into() }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends `--name=<path>`.
    pub fn path_flag(self, name: &str, path: &Path) -> Self {
        let mut arg = OsString::from(format!("--{name}="));
        arg.push(path);
        self.arg(arg)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Builds the [`Command`] for this invocation.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.current_dir);
        cmd
    }

    /// The invocation as it would be typed into a shell.
    pub fn command_line(&self) -> String {
        self.to_command().command_line()
    }
}

/// Runs external tools.
///
/// All process spawning goes through this trait, so the orchestration does not depend on
/// which binaries are actually executed.
pub trait ToolRunner {
    /// Runs `invocation` to completion, failing on spawn errors and non-zero exit codes.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }
}

/// Spawns the invocation as a child process and waits for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let output = invocation.to_command().exec()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            trace!(program = ?invocation.program, %stdout);
        }
        Ok(())
    }
}

/// The compile and generation steps of one compile action.
pub struct Toolchain<'a, R> {
    config: &'a CompileConfig,
    workspace: &'a Workspace,
    runner: R,
}

impl<'a, R: ToolRunner> Toolchain<'a, R> {
    pub fn new(config: &'a CompileConfig, workspace: &'a Workspace, runner: R) -> Self {
        Self { config, workspace, runner }
    }

    /// `solc <source> --bin --abi --overwrite -o <artifacts>`
    pub fn solc(&self) -> Invocation {
        let target = self.config.target();
        self.invocation(self.config.config().solc_program())
            .arg(self.workspace.source_file(target))
            .arg("--bin")
            .arg("--abi")
            .arg("--overwrite")
            .arg("-o")
            .arg(self.workspace.artifacts_dir())
    }

    /// `web3j generate solidity -b <bin> -a <abi> -o <output> -p <package>`
    pub fn web3j(&self, package: &str) -> Invocation {
        let target = self.config.target();
        self.invocation(self.config.config().web3j_program())
            .arg("generate")
            .arg("solidity")
            .arg("-b")
            .arg(self.workspace.bin_file(target))
            .arg("-a")
            .arg(self.workspace.abi_file(target))
            .arg("-o")
            .arg(self.config.config().output_path())
            .arg("-p")
            .arg(package)
    }

    /// `abigen --bin=<bin> --abi=<abi> --out=<output>/<target>.go --pkg=<package>`
    pub fn abigen(&self, package: &str) -> Invocation {
        let target = self.config.target();
        self.invocation(self.config.config().abigen_program())
            .path_flag("bin", &self.workspace.bin_file(target))
            .path_flag("abi", &self.workspace.abi_file(target))
            .path_flag("out", &self.go_file())
            .arg(format!("--pkg={package}"))
    }

    /// Compiles the staged target contract into the artifacts subtree.
    pub fn compile(&self) -> Result<()> {
        let target = self.config.target();
        let source = self.workspace.source_file(target);
        if !source.is_file() {
            eyre::bail!(
                "contract `{target}` not found: the contract folder {:?} has no `{target}.sol`",
                self.config.config().contracts_path()
            );
        }

        let solc = self.solc();
        self.runner.run(&solc).wrap_err("failed to compile with solc")?;

        for artifact in [self.workspace.bin_file(target), self.workspace.abi_file(target)] {
            if !artifact.is_file() {
                eyre::bail!(
                    "`{}` did not produce {artifact:?}, does `{target}.sol` define a contract \
                     named `{target}`?",
                    solc.command_line()
                );
            }
        }
        Ok(())
    }

    /// Runs the generation step selected by the configured language.
    ///
    /// Returns the generated paths.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        let output = self.config.config().output_path();
        fs::create_dir_all(&output)?;

        match self.config.bindings() {
            Bindings::Java { package } => {
                self.runner
                    .run(&self.web3j(package))
                    .wrap_err("failed to generate Java wrappers with web3j")?;
                Ok(vec![output])
            }
            Bindings::Go { package } => {
                self.runner
                    .run(&self.abigen(package))
                    .wrap_err("failed to generate Go bindings with abigen")?;
                Ok(vec![self.go_file()])
            }
            Bindings::Abi => self.copy_artifacts(&output),
        }
    }

    /// Copies `<target>.bin` and `<target>.abi` from the artifacts subtree to `output`.
    fn copy_artifacts(&self, output: &Path) -> Result<Vec<PathBuf>> {
        let target = self.config.target();
        let mut copied = Vec::with_capacity(2);
        for artifact in [self.workspace.bin_file(target), self.workspace.abi_file(target)] {
            let Some(name) = artifact.file_name() else { continue };
            let dest = output.join(name);
            fs::copy(&artifact, &dest).wrap_err("failed to copy compiler artifacts")?;
            copied.push(dest);
        }
        Ok(copied)
    }

    fn go_file(&self) -> PathBuf {
        self.config.config().output_path().join(format!("{}.go", self.config.target()))
    }

    fn invocation(&self, program: PathBuf) -> Invocation {
        Invocation::new(program, &self.config.config().root)
    }
}
