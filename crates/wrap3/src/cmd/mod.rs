//! Subcommands of wrap3.
//!
//! Every subcommand reads its paths from [`wrap3_config::Config`]. Arguments that override config
//! values implement `figment::Provider` and are merged on top of the file and environment layers,
//! see [`compile::CompileArgs`].

pub mod compile;

/// Common trait for all cli commands.
pub trait Cmd: clap::Parser + Sized {
    type Output;

    fn run(self) -> eyre::Result<Self::Output>;
}
