//! Captured execution of external processes.
use log::*;
use std::path::Path;
use tokio::process::Command;

use crate::{error::ActionError, result::Result};

/// Captured output of a finished process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run a program with captured stdout/stderr, returning the output regardless
/// of exit code. Callers decide whether a non-zero exit is fatal.
pub async fn exec_with_output(
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> Result<CommandOutput> {
    debug!("running: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await?;

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    debug!("{} exited with code {}", program, code);

    Ok(CommandOutput {
        code,
        stdout,
        stderr,
    })
}

/// Run a program and fail with captured output on non-zero exit.
pub async fn exec_checked(
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> Result<CommandOutput> {
    let output = exec_with_output(program, args, cwd).await?;

    if !output.success() {
        return Err(ActionError::CommandFailed {
            program: program.to_string(),
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        }
        .into());
    }

    Ok(output)
}

/// Split a user-supplied command line on whitespace into program and args.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace();

    let program = parts
        .next()
        .ok_or(ActionError::missing_input("prepare script command"))?
        .to_string();

    let args = parts.map(String::from).collect();

    Ok((program, args))
}
