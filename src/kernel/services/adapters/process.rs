//! Blocking helpers for the `kind` and `kubectl` command-line tools.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::kernel::services::ports::{Result, ServiceError};

/// Runs `program args..`, feeding `stdin` when given, and returns stdout on a zero exit status.
pub fn run(program: &str, args: &[&str], stdin: Option<&str>) -> Result<String> {
    let command_line = describe(program, args);
    tracing::debug!(command = %command_line, "running");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| ServiceError::Spawn {
        program: program.to_string(),
        source,
    })?;

    // The child is reaped before a failed write is reported.
    let fed = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => pipe.write_all(input.as_bytes()),
        _ => Ok(()),
    };

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(command = %command_line, status = %output.status, %stderr, "command failed");
        return Err(ServiceError::CommandFailed {
            command: command_line,
            status: output.status.to_string(),
            stderr,
        });
    }
    fed?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/process.rs"]
mod tests;
