// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! External command execution

use crate::error::{AppError, Result};
use futures_util::future::BoxFuture;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs one CLI invocation and returns its standard output
pub trait CommandExecutor: Send + Sync {
    /// Executes `argv` (program first) and collects stdout as text
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Execution`] when the program cannot be started,
    /// exits with a failure status, times out or prints non UTF-8 output,
    /// and [`AppError::Cancelled`] once `cancel` fires.
    fn output<'a>(
        &'a self,
        argv: &'a [String],
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<String>>;
}

/// [`CommandExecutor`] backed by child processes
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    timeout: Duration,
}

impl ProcessExecutor {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run(&self, argv: &[String], cancel: &CancellationToken) -> Result<String> {
        let command = argv.join(" ");
        let Some((program, args)) = argv.split_first() else {
            return Err(AppError::Execution {
                command,
                message: "empty command line".to_string(),
            });
        };

        tracing::debug!("Executing `{}`", command);
        // Dropping the child (timeout, cancellation, aborted request) kills it
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Execution {
                command: command.clone(),
                message: format!("failed to start: {e}"),
            })?;

        let output = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Cancelled `{}`", command);
                return Err(AppError::Cancelled { command });
            }
            result = tokio::time::timeout(self.timeout, child.wait_with_output()) => match result {
                Ok(output) => output.map_err(|e| AppError::Execution {
                    command: command.clone(),
                    message: e.to_string(),
                })?,
                Err(_) => {
                    return Err(AppError::Execution {
                        command,
                        message: format!("timed out after {}s", self.timeout.as_secs()),
                    });
                }
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Execution {
                command,
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| AppError::Execution {
            command,
            message: format!("output is not valid UTF-8: {e}"),
        })
    }
}

impl CommandExecutor for ProcessExecutor {
    fn output<'a>(
        &'a self,
        argv: &'a [String],
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.run(argv, cancel))
    }
}
