//! The command line of the `wrap3` binary.

use crate::cmd::{Cmd, compile::CompileArgs};
use clap::{Parser, Subcommand};
use eyre::Result;
use std::ffi::{OsStr, OsString};

/// Legacy two-letter spellings and the long flags they stand for.
const LEGACY_FLAGS: &[(&str, &str)] = &[("-cf", "--contracts"), ("-nf", "--node")];

/// Generate Java wrappers, Go bindings or raw artifacts from Solidity contracts.
#[derive(Debug, Parser)]
#[command(
    name = "wrap3",
    version,
    arg_required_else_help = true,
    after_help = "Example: wrap3 compile -l java -t Token -p com.example.token"
)]
pub struct Wrap3 {
    #[command(subcommand)]
    pub cmd: Wrap3Subcommand,
}

#[derive(Debug, Subcommand)]
pub enum Wrap3Subcommand {
    /// Compile a contract and generate bindings for it.
    Compile(CompileArgs),
}

/// Rewrites the legacy `-cf`/`-nf` flags, including their `=value` forms, to the long flags.
///
/// Everything after a `--` separator is left alone.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut escaped = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if escaped {
                return arg;
            }
            if arg == "--" {
                escaped = true;
                return arg;
            }
            legacy_flag(&arg).unwrap_or(arg)
        })
        .collect()
}

fn legacy_flag(arg: &OsStr) -> Option<OsString> {
    let arg = arg.to_str()?;
    LEGACY_FLAGS.iter().find_map(|&(legacy, long)| {
        let rest = arg.strip_prefix(legacy)?;
        if rest.is_empty() || rest.starts_with('=') {
            Some(format!("{long}{rest}").into())
        } else {
            None
        }
    })
}

/// Parses the process arguments and runs the selected subcommand.
pub fn run() -> Result<()> {
    let args = Wrap3::parse_from(normalize_legacy_args(std::env::args_os()));
    match args.cmd {
        Wrap3Subcommand::Compile(cmd) => cmd.run().map(drop),
    }
}
