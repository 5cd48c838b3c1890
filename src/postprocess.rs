//! Post-processing of rendered text through external commands.
//!
//! Each command receives the current text on stdin; whatever it writes to
//! stdout becomes the input of the next command.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::error::{Error, Result};

/// Pipes `payload` through every command in order and returns the final text.
///
/// An empty command list returns the payload unchanged. The first command
/// that exits unsuccessfully aborts the chain.
pub fn run_post_processors<S: AsRef<str>>(commands: &[S], payload: String) -> Result<String> {
    commands
        .iter()
        .try_fold(payload, |text, command| {
            run_post_processor(command.as_ref(), &text)
        })
}

/// Runs a single command with `payload` on stdin and returns its stdout.
///
/// The command string is split on whitespace into a program and its
/// arguments. Quoting is not interpreted, so an argument cannot contain
/// spaces. The call blocks until the process exits.
pub fn run_post_processor(command: &str, payload: &str) -> Result<String> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        Error::InvalidArgumentsError("post-processor command is empty".to_string())
    })?;

    debug!("Running post-processor '{command}'");

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Error::PostProcessorSpawnError {
            command: command.to_string(),
            source,
        })?;

    // Feed stdin from its own thread so a child that fills its stdout pipe
    // before draining stdin cannot deadlock us.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = payload.as_bytes().to_vec();
        thread::spawn(move || stdin.write_all(&input))
    });

    let output = child.wait_with_output()?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            // The child may exit without reading all of its input.
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("'{command}' closed stdin early")
            }
            Ok(Err(e)) => return Err(Error::IoError(e)),
            Err(_) => {
                return Err(Error::IoError(std::io::Error::other(
                    "post-processor stdin writer panicked",
                )))
            }
        }
    }

    if !output.status.success() {
        return Err(Error::PostProcessorFailedError {
            command: command.to_string(),
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
