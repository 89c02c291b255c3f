// The fake toolchain consists of shell scripts.
#![cfg(unix)]

#[macro_use]
extern crate wrap3_test_utils;

pub mod constants;

mod cmd;
mod compile;
mod config;
