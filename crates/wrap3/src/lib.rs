//! # wrap3
//!
//! Stages a Solidity contract tree, compiles it with `solc` and turns the artifacts into Java
//! wrappers (web3j), Go bindings (abigen) or plain `.bin`/`.abi` files.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod config;
pub mod imports;
pub mod tools;
pub mod workspace;

mod lang;
pub use lang::{Lang, UnsupportedLang};

pub use config::{Bindings, CompileConfig};
pub use workspace::Workspace;

/// The node package staged next to the user's contracts.
pub const DEPENDENCY_PACKAGE: &str = "@openzeppelin";

/// The extension of Solidity source files.
pub const SOURCE_EXTENSION: &str = ".sol";
