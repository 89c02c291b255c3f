//! # wrap3-common
//!
//! Common utilities shared by the wrap3 crates.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod errors;
pub mod fs;
pub mod process;

pub use process::CommandUtils;
