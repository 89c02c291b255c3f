//! Helpers for running external programs.

use eyre::{Result, WrapErr};
use std::{
    ffi::OsStr,
    process::{Command, Output},
};

/// Extension trait for [`Command`].
pub trait CommandUtils {
    /// Renders the program and its arguments the way they would be typed into a shell.
    fn command_line(&self) -> String;

    /// Runs the command to completion and returns its output.
    ///
    /// Fails if the program could not be spawned or exited unsuccessfully. The error contains
    /// the full command line and whatever the program wrote to stdout/stderr.
    fn exec(&mut self) -> Result<Output>;
}

impl CommandUtils for Command {
    fn command_line(&self) -> String {
        std::iter::once(self.get_program())
            .chain(self.get_args())
            .map(shell_word)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[track_caller]
    fn exec(&mut self) -> Result<Output> {
        let command_line = self.command_line();
        trace!(command = %command_line, cwd = ?self.get_current_dir(), "executing");

        let output =
            self.output().wrap_err_with(|| format!("failed to execute `{command_line}`"))?;
        trace!(code = ?output.status.code(), "finished `{command_line}`");

        if output.status.success() {
            return Ok(output);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let (stdout, stderr) = (stdout.trim(), stderr.trim());
        let msg = if stdout.is_empty() {
            stderr.to_string()
        } else if stderr.is_empty() {
            stdout.to_string()
        } else {
            format!("stdout:\n{stdout}\n\nstderr:\n{stderr}")
        };

        let mut err = match output.status.code() {
            Some(code) => format!("`{command_line}` exited with code {code}"),
            None => format!("`{command_line}` terminated by a signal"),
        };
        if !msg.is_empty() {
            err.push(':');
            err.push(if msg.lines().count() > 1 { '\n' } else { ' ' });
            err.push_str(&msg);
        }
        Err(eyre::eyre!(err))
    }
}

/// Quotes `word` if a shell would otherwise split or reinterpret it.
fn shell_word(word: &OsStr) -> String {
    let word = word.to_string_lossy();
    let plain = !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,%".contains(c));
    if plain { word.into_owned() } else { format!("'{}'", word.replace('\'', r"'\''")) }
}
